use thiserror::Error;

use crate::shared::face::FaceRecord;

/// Facial attribute kinds the detection service can be asked to
/// return alongside face geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceAttributeKind {
    HeadPose,
    Blur,
    Mask,
}

/// The attribute set requested for every detection call. Fixed: the
/// record model carries exactly these attributes.
pub const REQUESTED_ATTRIBUTES: &[FaceAttributeKind] = &[
    FaceAttributeKind::HeadPose,
    FaceAttributeKind::Blur,
    FaceAttributeKind::Mask,
];

/// Failure of a detection round-trip.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("detection service rejected the credentials")]
    Unauthorized,
    #[error("detection service throttled the request")]
    Throttled,
    #[error("detection service rejected the image: {0}")]
    InvalidImage(String),
    #[error("detection service returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("failed to reach the detection service: {0}")]
    Transport(String),
    #[error("malformed detection response: {0}")]
    MalformedResponse(String),
}

/// Domain interface for remote face detection.
///
/// Returns records in the order the service reported them; that order
/// is not stable across calls. An empty vector means no faces were
/// found and is not an error.
pub trait FaceDetector: Send {
    fn detect(
        &self,
        image: &[u8],
        attributes: &[FaceAttributeKind],
    ) -> Result<Vec<FaceRecord>, ServiceError>;
}
