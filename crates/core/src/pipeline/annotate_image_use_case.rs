use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::annotation::domain::face_annotator::FaceAnnotator;
use crate::detection::domain::face_detector::{FaceDetector, REQUESTED_ATTRIBUTES};
use crate::imaging::domain::image_decoder::ImageDecoder;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::constants::OUTPUT_SUFFIX;

use super::error::ProcessError;
use super::outcome::ImageOutcome;

/// Single-image pipeline: existence check → read → detect → annotate
/// → write.
///
/// Collaborators are injected so the pipeline can run against a fake
/// detection service and in-memory I/O.
pub struct AnnotateImageUseCase {
    detector: Box<dyn FaceDetector>,
    decoder: Box<dyn ImageDecoder>,
    writer: Box<dyn ImageWriter>,
    annotator: FaceAnnotator,
}

impl AnnotateImageUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        decoder: Box<dyn ImageDecoder>,
        writer: Box<dyn ImageWriter>,
        annotator: FaceAnnotator,
    ) -> Self {
        Self {
            detector,
            decoder,
            writer,
            annotator,
        }
    }

    /// Detects and annotates faces in one image file.
    ///
    /// An empty detection result is a success with no output file.
    /// Nothing is written unless the whole pipeline succeeds.
    pub fn execute(&self, path: &Path) -> Result<ImageOutcome, ProcessError> {
        if !path.is_file() {
            return Err(ProcessError::PathNotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path).map_err(|source| ProcessError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let faces = self.detector.detect(&bytes, REQUESTED_ATTRIBUTES)?;
        if faces.is_empty() {
            log::info!("No faces detected in {}", path.display());
            return Ok(ImageOutcome::NoFaces);
        }

        let mut frame = self
            .decoder
            .decode(&bytes)
            .map_err(|e| ProcessError::Decode(e.to_string()))?;
        self.annotator.annotate(&mut frame, &faces);

        let output_path = derived_output_path(path);
        self.writer
            .write(&output_path, &frame)
            .map_err(|e| ProcessError::Write {
                path: output_path.clone(),
                message: e.to_string(),
            })?;

        log::info!(
            "Annotated {} faces in {} -> {}",
            faces.len(),
            path.display(),
            output_path.display()
        );
        Ok(ImageOutcome::Annotated { faces, output_path })
    }
}

/// Derives the output path by inserting the suffix before the source
/// extension, preserving the extension: `people.jpg` becomes
/// `people_detected.jpg`. An extensionless source gets a bare suffix.
pub fn derived_output_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_stem()
        .unwrap_or_else(|| OsStr::new(""))
        .to_os_string();
    name.push(OUTPUT_SUFFIX);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}
