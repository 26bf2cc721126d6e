use crate::clustering::domain::center_aggregator::CenterAggregator;

/// Per-dimension arithmetic mean, the classic k-means center update.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeanAggregator;

impl CenterAggregator for MeanAggregator {
    fn aggregate(&self, values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
