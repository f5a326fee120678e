use std::fs;
use std::path::Path;

use crate::shared::constants::IMAGE_EXTENSIONS;

use super::annotate_image_use_case::AnnotateImageUseCase;
use super::error::ProcessError;
use super::outcome::{FileOutcome, FolderSummary};

/// Applies the single-image pipeline to every eligible file in a
/// directory.
///
/// Failures are isolated per file: one file's error is recorded in its
/// outcome and the batch moves on. Only a missing or unreadable
/// directory fails the batch itself.
pub struct AnnotateFolderUseCase {
    image_use_case: AnnotateImageUseCase,
}

impl AnnotateFolderUseCase {
    pub fn new(image_use_case: AnnotateImageUseCase) -> Self {
        Self { image_use_case }
    }

    /// Processes every image file directly inside `dir`, in file-name
    /// order. Each matching file is visited exactly once.
    pub fn execute(&self, dir: &Path) -> Result<FolderSummary, ProcessError> {
        if !dir.is_dir() {
            return Err(ProcessError::PathNotFound(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        let entries = fs::read_dir(dir).map_err(|source| ProcessError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| ProcessError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && has_image_extension(&path) {
                files.push(path);
            }
        }
        // Directory order is filesystem-defined; sort for stable runs.
        files.sort();

        if files.is_empty() {
            log::info!("No image files found in {}", dir.display());
            return Ok(FolderSummary::default());
        }

        log::info!("Found {} images in {}", files.len(), dir.display());

        let mut outcomes = Vec::with_capacity(files.len());
        for path in files {
            let result = self.image_use_case.execute(&path);
            if let Err(ref e) = result {
                log::warn!("Skipping {}: {e}", path.display());
            }
            outcomes.push(FileOutcome { path, result });
        }
        Ok(FolderSummary { outcomes })
    }
}

/// Case-insensitive extension match against the accepted list.
fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
