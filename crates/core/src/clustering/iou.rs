//! Origin-anchored IoU between box sizes and cluster centers.
//!
//! Both sides are `(width, height)` pairs sharing a corner, so the overlap
//! is simply the smaller width times the smaller height. This makes the
//! similarity scale-invariant: a small box close in shape to a small
//! cluster scores as well as a large box to a large cluster.

use ndarray::{Array2, Axis};
use thiserror::Error;

use crate::shared::box_size::BoxSize;
use crate::shared::constants::IOU_EPSILON;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IouError {
    #[error("box {box_index} and cluster {cluster_index} have no area in common")]
    InvalidBox {
        box_index: usize,
        cluster_index: usize,
    },
}

/// N×K IoU matrix between `boxes` (rows) and `clusters` (columns).
///
/// Fails on the first pair whose overlap width or height is not positive.
/// That can only happen when a zero-sized box slipped past the loader, so
/// the whole batch is rejected rather than the entry skipped.
pub fn iou_matrix(boxes: &[BoxSize], clusters: &[BoxSize]) -> Result<Array2<f64>, IouError> {
    let mut ious = Array2::<f64>::zeros((boxes.len(), clusters.len()));

    for (i, b) in boxes.iter().enumerate() {
        for (j, c) in clusters.iter().enumerate() {
            ious[[i, j]] = anchored_iou(b, c).ok_or(IouError::InvalidBox {
                box_index: i,
                cluster_index: j,
            })?;
        }
    }

    Ok(ious)
}

/// IoU of one box and one cluster sharing a corner.
///
/// `None` when the overlap width or height is not positive (zero, negative
/// or NaN), which only a degenerate box can produce.
pub fn anchored_iou(b: &BoxSize, c: &BoxSize) -> Option<f64> {
    let iw = b.width.min(c.width);
    let ih = b.height.min(c.height);
    if !(iw > 0.0 && ih > 0.0) {
        return None;
    }

    let intersection = iw * ih;
    let union = b.area() + c.area() - intersection;
    Some(intersection / (union + IOU_EPSILON))
}

/// Mean over boxes of each box's best IoU against any cluster.
///
/// Returns 0.0 when either side is empty.
pub fn average_iou(boxes: &[BoxSize], clusters: &[BoxSize]) -> Result<f64, IouError> {
    if boxes.is_empty() || clusters.is_empty() {
        return Ok(0.0);
    }

    let ious = iou_matrix(boxes, clusters)?;
    let best = ious.map_axis(Axis(1), |row| row.fold(0.0_f64, |acc, &v| acc.max(v)));
    Ok(best.mean().unwrap_or(0.0))
}
