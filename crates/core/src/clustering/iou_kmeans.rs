//! Lloyd's k-means over box sizes with `1 - IoU` as the distance.
//!
//! Centers start as a Forgy sample of distinct dataset rows and are updated
//! per dimension by a [`CenterAggregator`] (median by default). A cluster
//! left without members is re-seeded from a random dataset box instead of
//! being aggregated over nothing.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::clustering::domain::center_aggregator::CenterAggregator;
use crate::clustering::domain::cluster_observer::{ClusterObserver, NullClusterObserver};
use crate::clustering::infrastructure::median_aggregator::MedianAggregator;
use crate::clustering::iou::{iou_matrix, IouError};
use crate::shared::box_size::BoxSize;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansError {
    #[error("cluster count must be at least 1")]
    ZeroClusters,
    #[error("cannot seed {requested} clusters from {available} distinct boxes")]
    InsufficientData { requested: usize, available: usize },
    #[error("invalid box reached the IoU metric: {0}")]
    InvalidBox(#[from] IouError),
    #[error("k-means did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },
}

/// Converged centers plus the final assignment pass that confirmed them.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    pub clusters: Vec<BoxSize>,
    /// Cluster index of every dataset box, in dataset order.
    pub assignments: Vec<usize>,
    /// Number of assignment passes, the confirming one included.
    pub iterations: usize,
}

impl Clustering {
    /// Number of boxes assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.clusters.len()];
        for &c in &self.assignments {
            sizes[c] += 1;
        }
        sizes
    }
}

pub struct IouKMeans {
    k: usize,
    aggregator: Box<dyn CenterAggregator>,
    max_iterations: Option<usize>,
}

impl IouKMeans {
    /// Median-updated k-means with no iteration cap.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            aggregator: Box::new(MedianAggregator),
            max_iterations: None,
        }
    }

    pub fn with_aggregator(mut self, aggregator: Box<dyn CenterAggregator>) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Fail with [`KMeansError::NotConverged`] after `max` assignment passes.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Clusters `boxes` with a fresh `StdRng` seeded from `seed`.
    pub fn fit_seeded(&self, boxes: &[BoxSize], seed: u64) -> Result<Clustering, KMeansError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.fit(boxes, &mut rng, &mut NullClusterObserver)
    }

    /// Runs assign/update passes until assignments repeat with every
    /// cluster occupied.
    ///
    /// All randomness (initial sample and re-seeds) is drawn from `rng`, so
    /// a seeded generator makes runs reproducible.
    pub fn fit<R: Rng + ?Sized>(
        &self,
        boxes: &[BoxSize],
        rng: &mut R,
        observer: &mut dyn ClusterObserver,
    ) -> Result<Clustering, KMeansError> {
        self.validate(boxes)?;

        let n = boxes.len();
        let mut clusters: Vec<BoxSize> = index::sample(rng, n, self.k)
            .into_iter()
            .map(|i| boxes[i])
            .collect();
        let mut previous: Option<Vec<usize>> = None;
        let mut iteration = 0;

        loop {
            iteration += 1;
            if let Some(max) = self.max_iterations {
                if iteration > max {
                    return Err(KMeansError::NotConverged { iterations: max });
                }
            }

            let assignments = nearest_clusters(boxes, &clusters)?;
            let reassigned = match &previous {
                Some(prev) => prev
                    .iter()
                    .zip(&assignments)
                    .filter(|(a, b)| a != b)
                    .count(),
                None => n,
            };
            observer.iteration(iteration, reassigned);

            let members = group_members(&assignments, self.k);
            let all_occupied = members.iter().all(|m| !m.is_empty());
            if reassigned == 0 && all_occupied {
                observer.converged(iteration);
                return Ok(Clustering {
                    clusters,
                    assignments,
                    iterations: iteration,
                });
            }

            for (cluster, member_indices) in members.iter().enumerate() {
                if member_indices.is_empty() {
                    observer.empty_cluster(iteration, cluster);
                    clusters[cluster] = boxes[rng.gen_range(0..n)];
                    continue;
                }
                clusters[cluster] = self.center_of(boxes, member_indices);
            }

            previous = Some(assignments);
        }
    }

    fn validate(&self, boxes: &[BoxSize]) -> Result<(), KMeansError> {
        if self.k == 0 {
            return Err(KMeansError::ZeroClusters);
        }
        if boxes.len() < self.k {
            return Err(KMeansError::InsufficientData {
                requested: self.k,
                available: boxes.len(),
            });
        }
        // Fewer distinct shapes than clusters can never leave every cluster occupied.
        let distinct = count_distinct(boxes);
        if distinct < self.k {
            return Err(KMeansError::InsufficientData {
                requested: self.k,
                available: distinct,
            });
        }
        Ok(())
    }

    fn center_of(&self, boxes: &[BoxSize], member_indices: &[usize]) -> BoxSize {
        let widths: Vec<f64> = member_indices.iter().map(|&i| boxes[i].width).collect();
        let heights: Vec<f64> = member_indices.iter().map(|&i| boxes[i].height).collect();
        BoxSize::new(
            self.aggregator.aggregate(&widths),
            self.aggregator.aggregate(&heights),
        )
    }
}

/// Median k-means returning only the centers.
pub fn kmeans<R: Rng + ?Sized>(
    boxes: &[BoxSize],
    k: usize,
    rng: &mut R,
) -> Result<Vec<BoxSize>, KMeansError> {
    IouKMeans::new(k)
        .fit(boxes, rng, &mut NullClusterObserver)
        .map(|c| c.clusters)
}

/// Index of the closest cluster (by `1 - IoU`) for every box.
///
/// Ties go to the lowest cluster index.
pub fn nearest_clusters(boxes: &[BoxSize], clusters: &[BoxSize]) -> Result<Vec<usize>, IouError> {
    let distances = iou_matrix(boxes, clusters)?.mapv(|iou| 1.0 - iou);
    Ok(distances
        .outer_iter()
        .map(|row| {
            let mut best = 0;
            let mut best_distance = f64::INFINITY;
            for (j, &d) in row.iter().enumerate() {
                if d < best_distance {
                    best = j;
                    best_distance = d;
                }
            }
            best
        })
        .collect())
}

fn group_members(assignments: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut members = vec![Vec::new(); k];
    for (i, &c) in assignments.iter().enumerate() {
        members[c].push(i);
    }
    members
}

fn count_distinct(boxes: &[BoxSize]) -> usize {
    let mut sorted: Vec<(f64, f64)> = boxes.iter().map(|b| (b.width, b.height)).collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    sorted.dedup();
    sorted.len()
}
