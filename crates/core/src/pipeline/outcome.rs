use std::path::PathBuf;

use crate::shared::face::FaceRecord;

use super::error::ProcessError;

/// Successful result of processing one image file.
#[derive(Debug)]
pub enum ImageOutcome {
    /// The service found no faces; no output file was written.
    NoFaces,
    /// Faces were annotated and written to `output_path`. Records are
    /// carried in service order so callers can report on them.
    Annotated {
        faces: Vec<FaceRecord>,
        output_path: PathBuf,
    },
}

/// Per-file result within a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<ImageOutcome, ProcessError>,
}

/// Outcome of a folder run. The batch itself always completes; an
/// empty summary means no eligible files were found.
#[derive(Debug, Default)]
pub struct FolderSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl FolderSummary {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of files whose pipeline failed.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }
}
