pub mod box_size;
pub mod constants;
