pub mod anchor_sort;
pub mod domain;
pub mod infrastructure;
pub mod iou;
pub mod iou_kmeans;
