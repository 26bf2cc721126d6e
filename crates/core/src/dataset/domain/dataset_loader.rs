use std::path::{Path, PathBuf};

use thiserror::Error;

use super::dataset::Dataset;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed XML in {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },
    #[error("{path}: missing <{field}>")]
    MissingField { path: PathBuf, field: String },
    #[error("{path}: <{field}> is not a number: '{value}'")]
    InvalidNumber {
        path: PathBuf,
        field: String,
        value: String,
    },
    #[error("{path}: image size must be positive to normalize boxes")]
    InvalidImageSize { path: PathBuf },
    #[error("no annotation files found in {path}")]
    NoAnnotations { path: PathBuf },
}

/// Domain interface for turning an annotation source into box sizes.
///
/// Implementations must drop zero-sized boxes rather than fail, so the
/// returned dataset is always safe to cluster.
pub trait DatasetLoader {
    fn load(&self, path: &Path) -> Result<Dataset, DatasetError>;
}
