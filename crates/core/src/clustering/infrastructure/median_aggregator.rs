use crate::clustering::domain::center_aggregator::CenterAggregator;

/// Per-dimension median, the default center update.
///
/// Even-sized inputs average the two middle values.
#[derive(Clone, Copy, Debug, Default)]
pub struct MedianAggregator;

impl CenterAggregator for MedianAggregator {
    fn aggregate(&self, values: &[f64]) -> f64 {
        median(values)
    }
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
