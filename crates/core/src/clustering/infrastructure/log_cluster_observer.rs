use crate::clustering::domain::cluster_observer::ClusterObserver;

/// Forwards iteration events to the `log` crate.
///
/// Per-iteration lines go to `debug` so long runs stay quiet at the
/// default `info` level; convergence is reported at `info`.
#[derive(Debug, Default)]
pub struct LogClusterObserver {
    empty_clusters: usize,
}

impl LogClusterObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total re-seeded clusters seen so far.
    pub fn empty_clusters(&self) -> usize {
        self.empty_clusters
    }
}

impl ClusterObserver for LogClusterObserver {
    fn iteration(&mut self, iteration: usize, reassigned: usize) {
        log::debug!("Iteration {iteration}: {reassigned} boxes changed cluster");
    }

    fn empty_cluster(&mut self, iteration: usize, cluster: usize) {
        self.empty_clusters += 1;
        log::debug!("Iteration {iteration}: cluster {cluster} is empty, re-seeding");
    }

    fn converged(&mut self, iterations: usize) {
        log::info!(
            "K-means converged after {iterations} iterations ({} empty-cluster re-seeds)",
            self.empty_clusters
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_empty_clusters() {
        let mut observer = LogClusterObserver::new();
        observer.iteration(1, 10);
        observer.empty_cluster(1, 2);
        observer.empty_cluster(2, 0);
        observer.converged(3);
        assert_eq!(observer.empty_clusters(), 2);
    }
}
