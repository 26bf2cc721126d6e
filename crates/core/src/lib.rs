pub mod clustering;
pub mod dataset;
pub mod report;
pub mod shared;
