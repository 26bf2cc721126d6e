/// Domain interface for collapsing one dimension of a cluster's members
/// into that dimension of its center.
///
/// Called once for widths and once for heights. Input is never empty:
/// empty clusters are re-seeded instead of aggregated.
pub trait CenterAggregator: Send + Sync {
    fn aggregate(&self, values: &[f64]) -> f64;
}

impl<F> CenterAggregator for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn aggregate(&self, values: &[f64]) -> f64 {
        self(values)
    }
}
