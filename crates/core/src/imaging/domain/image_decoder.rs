use crate::shared::frame::Frame;

/// Decodes raw image-file bytes into an RGB frame.
///
/// Implementations handle container formats and color conversion; the
/// pipeline works with the abstract `Frame` only.
pub trait ImageDecoder: Send {
    fn decode(&self, bytes: &[u8]) -> Result<Frame, Box<dyn std::error::Error>>;
}
