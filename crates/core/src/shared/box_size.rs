use serde::Serialize;

/// An origin-anchored bounding box, described only by its extent.
///
/// Boxes fed to clustering must have strictly positive width and height;
/// loaders drop degenerate boxes before they reach the metric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Translates a corner-form box `(xmin, ymin, xmax, ymax)` to the origin.
    ///
    /// Extents are absolute, so swapped corners still yield a positive size.
    pub fn from_corners(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            width: (xmax - xmin).abs(),
            height: (ymax - ymin).abs(),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Height over width, the ratio reported next to each anchor.
    pub fn aspect_ratio(&self) -> f64 {
        self.height / self.width
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Translates a batch of corner-form boxes to origin-anchored sizes.
pub fn translate_boxes(corners: &[[f64; 4]]) -> Vec<BoxSize> {
    corners
        .iter()
        .map(|&[xmin, ymin, xmax, ymax]| BoxSize::from_corners(xmin, ymin, xmax, ymax))
        .collect()
}
