pub mod center_aggregator;
pub mod cluster_observer;
