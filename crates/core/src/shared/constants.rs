/// Detection model identifier sent with every call. Opaque to this
/// crate; the service defines the vocabulary.
pub const DETECTION_MODEL: &str = "detection_03";

/// Recognition model identifier sent with every call.
pub const RECOGNITION_MODEL: &str = "recognition_04";

/// Suffix inserted before the extension of annotated output files.
pub const OUTPUT_SUFFIX: &str = "_detected";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
