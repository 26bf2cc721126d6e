pub mod aggregator_factory;
pub mod log_cluster_observer;
pub mod mean_aggregator;
pub mod median_aggregator;
