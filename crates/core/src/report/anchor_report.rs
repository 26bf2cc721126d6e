use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::clustering::anchor_sort::{sort_with_members, Anchor};
use crate::clustering::iou_kmeans::Clustering;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Machine-readable summary of a clustering run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnchorReport {
    pub clusters: usize,
    pub boxes: usize,
    pub iterations: usize,
    pub average_iou: f64,
    /// Sorted by ascending area.
    pub anchors: Vec<Anchor>,
    /// Boxes assigned to each entry of `anchors`.
    pub members: Vec<usize>,
}

impl AnchorReport {
    pub fn new(clustering: &Clustering, average_iou: f64) -> Self {
        let (anchors, members): (Vec<Anchor>, Vec<usize>) =
            sort_with_members(&clustering.clusters, &clustering.cluster_sizes())
                .into_iter()
                .unzip();
        Self {
            clusters: clustering.clusters.len(),
            boxes: clustering.assignments.len(),
            iterations: clustering.iterations,
            average_iou,
            anchors,
            members,
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| ReportError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
