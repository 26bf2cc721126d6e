use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clustering::domain::center_aggregator::CenterAggregator;

use super::mean_aggregator::MeanAggregator;
use super::median_aggregator::MedianAggregator;

/// Center update preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregatorKind {
    #[default]
    Median,
    Mean,
}

impl AggregatorKind {
    pub const ALL: &[AggregatorKind] = &[AggregatorKind::Median, AggregatorKind::Mean];
}

impl fmt::Display for AggregatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregatorKind::Median => write!(f, "median"),
            AggregatorKind::Mean => write!(f, "mean"),
        }
    }
}

impl FromStr for AggregatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "median" => Ok(AggregatorKind::Median),
            "mean" => Ok(AggregatorKind::Mean),
            other => {
                let names: Vec<String> = Self::ALL.iter().map(|k| k.to_string()).collect();
                Err(format!(
                    "Aggregator must be one of: {}, got '{other}'",
                    names.join(", ")
                ))
            }
        }
    }
}

pub fn create_aggregator(kind: AggregatorKind) -> Box<dyn CenterAggregator> {
    log::debug!("Using {kind} center aggregator");
    match kind {
        AggregatorKind::Median => Box::new(MedianAggregator),
        AggregatorKind::Mean => Box::new(MeanAggregator),
    }
}
