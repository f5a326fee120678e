use std::path::PathBuf;

use thiserror::Error;

use crate::detection::domain::face_detector::ServiceError;

/// Failure while processing one image file or enumerating a folder.
///
/// Every variant is terminal for the unit that produced it; the folder
/// pipeline catches per-file values instead of letting them propagate.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}
