/// Guards the IoU denominator against division by zero.
pub const IOU_EPSILON: f64 = 1e-7;

/// Nine anchors, the YOLOv3 layout (three per detection scale).
pub const DEFAULT_CLUSTERS: usize = 9;

pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

pub const ANNOTATION_EXTENSION: &str = "xml";
