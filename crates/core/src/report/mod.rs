pub mod anchor_report;
pub mod anchor_table;
pub mod shape_histogram;
