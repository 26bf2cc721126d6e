/// Observer for k-means iteration events.
///
/// Keeps progress reporting out of the clustering loop so callers choose
/// where events go (log crate, progress bar, nowhere).
pub trait ClusterObserver {
    /// Called after each assignment pass. `reassigned` counts boxes whose
    /// cluster differs from the previous pass (all of them on the first).
    fn iteration(&mut self, iteration: usize, reassigned: usize);

    /// A cluster received no boxes and was re-seeded from the dataset.
    fn empty_cluster(&mut self, iteration: usize, cluster: usize);

    /// Assignments stabilised with every cluster occupied.
    fn converged(&mut self, iterations: usize);
}

/// Silent observer that discards all events.
pub struct NullClusterObserver;

impl ClusterObserver for NullClusterObserver {
    fn iteration(&mut self, _iteration: usize, _reassigned: usize) {}
    fn empty_cluster(&mut self, _iteration: usize, _cluster: usize) {}
    fn converged(&mut self, _iterations: usize) {}
}
