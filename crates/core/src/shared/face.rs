use std::fmt;

/// Axis-aligned face bounding box in image pixel coordinates.
///
/// Offsets are non-negative and the service reports positive
/// dimensions, but the box is not guaranteed to lie fully inside the
/// image it was detected in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRectangle {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRectangle {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Intersection of the box with a `width` x `height` image, as
    /// `(x0, y0, x1, y1)` with exclusive right/bottom edges.
    ///
    /// `None` when the box lies entirely outside the image.
    pub fn clipped(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.left.min(width);
        let y0 = self.top.min(height);
        let x1 = self.left.saturating_add(self.width).min(width);
        let y1 = self.top.saturating_add(self.height).min(height);
        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }
}

/// Face orientation in degrees, as reported by the service.
/// Informational only; no range is validated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadPose {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for BlurLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlurLevel::Low => "low",
            BlurLevel::Medium => "medium",
            BlurLevel::High => "high",
        };
        write!(f, "{name}")
    }
}

/// Presence and kind of face covering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskType {
    NoMask,
    FaceMask,
    OtherMaskOrOcclusion,
    Uncertain,
}

impl fmt::Display for MaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaskType::NoMask => "noMask",
            MaskType::FaceMask => "faceMask",
            MaskType::OtherMaskOrOcclusion => "otherMaskOrOcclusion",
            MaskType::Uncertain => "uncertain",
        };
        write!(f, "{name}")
    }
}

/// One detected face: geometry plus the attributes requested from the
/// service. Created per detection call, consumed once, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceRecord {
    pub rectangle: FaceRectangle,
    pub head_pose: HeadPose,
    pub blur_level: BlurLevel,
    pub mask: MaskType,
}
