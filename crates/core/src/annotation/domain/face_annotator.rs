use crate::shared::face::{FaceRecord, FaceRectangle};
use crate::shared::frame::{Frame, CHANNELS};

use super::glyph_font;

/// Outline stroke width in pixels.
const STROKE_WIDTH: u32 = 5;

/// Outline and label-tag color (light green).
const BOX_COLOR: [u8; 3] = [144, 238, 144];

/// Label text color, drawn over the tag background.
const TEXT_COLOR: [u8; 3] = [0, 0, 0];

/// Integer upscale applied to the 5x7 label glyphs.
const LABEL_SCALE: u32 = 2;

/// Padding between the tag border and the label text, in pixels.
const TAG_PADDING: u32 = 2;

/// Draws detection results onto a frame and formats per-face reports.
///
/// Labels are purely positional: `Face N` is the record's 1-based
/// position in the slice, with no identity across calls. Geometry
/// outside the frame is clipped away, never rejected; drawing cannot
/// fail.
pub struct FaceAnnotator {
    stroke_width: u32,
    color: [u8; 3],
}

impl FaceAnnotator {
    pub fn new(stroke_width: u32, color: [u8; 3]) -> Self {
        Self {
            stroke_width,
            color,
        }
    }

    /// Draws one labeled box per record, in sequence order. A record
    /// whose box has no visible intersection with the frame keeps its
    /// position in the sequence but draws nothing.
    pub fn annotate(&self, frame: &mut Frame, faces: &[FaceRecord]) {
        for (index, face) in faces.iter().enumerate() {
            if face
                .rectangle
                .clipped(frame.width(), frame.height())
                .is_none()
            {
                continue;
            }
            self.draw_outline(frame, &face.rectangle);
            self.draw_label(frame, &face.rectangle, &label(index + 1));
        }
    }

    /// Draws the four outline edges as filled bars. Each bar is
    /// positioned on the unclipped box and then clipped individually,
    /// so an edge past the frame boundary simply isn't drawn.
    fn draw_outline(&self, frame: &mut Frame, rect: &FaceRectangle) {
        let s = self.stroke_width;
        let x0 = rect.left;
        let y0 = rect.top;
        let x1 = rect.left.saturating_add(rect.width);
        let y1 = rect.top.saturating_add(rect.height);

        // top, bottom, left, right; bars shrink rather than cross on
        // boxes thinner than two strokes
        fill_rect(frame, x0, y0, x1, y0.saturating_add(s).min(y1), self.color);
        fill_rect(frame, x0, y1.saturating_sub(s).max(y0), x1, y1, self.color);
        fill_rect(frame, x0, y0, x0.saturating_add(s).min(x1), y1, self.color);
        fill_rect(frame, x1.saturating_sub(s).max(x0), y0, x1, y1, self.color);
    }

    /// Renders the label on an opaque tag anchored at the rectangle's
    /// top-left corner.
    fn draw_label(&self, frame: &mut Frame, rect: &FaceRectangle, text: &str) {
        let text_w = glyph_font::text_width(text) as u32 * LABEL_SCALE;
        let text_h = glyph_font::GLYPH_HEIGHT as u32 * LABEL_SCALE;
        let x0 = rect.left;
        let y0 = rect.top;
        let x1 = x0.saturating_add(text_w + 2 * TAG_PADDING);
        let y1 = y0.saturating_add(text_h + 2 * TAG_PADDING);

        fill_rect(frame, x0, y0, x1, y1, self.color);
        draw_text(
            frame,
            x0.saturating_add(TAG_PADDING),
            y0.saturating_add(TAG_PADDING),
            text,
            LABEL_SCALE,
            TEXT_COLOR,
        );
    }
}

impl Default for FaceAnnotator {
    fn default() -> Self {
        Self::new(STROKE_WIDTH, BOX_COLOR)
    }
}

/// One report line per face: label, rectangle position, head pose,
/// blur level, mask type, in that fixed order.
pub fn summarize(faces: &[FaceRecord]) -> Vec<String> {
    faces
        .iter()
        .enumerate()
        .map(|(index, face)| {
            let r = &face.rectangle;
            let pose = &face.head_pose;
            format!(
                "{}: rectangle left={} top={} width={} height={}, \
                 yaw={:.1} pitch={:.1} roll={:.1}, blur={}, mask={}",
                label(index + 1),
                r.left,
                r.top,
                r.width,
                r.height,
                pose.yaw,
                pose.pitch,
                pose.roll,
                face.blur_level,
                face.mask,
            )
        })
        .collect()
}

fn label(position: usize) -> String {
    format!("Face {position}")
}

/// Fills `[x0, x1) x [y0, y1)`, clipped to the frame.
fn fill_rect(frame: &mut Frame, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 3]) {
    let x0 = x0.min(frame.width()) as usize;
    let x1 = x1.min(frame.width()) as usize;
    let y0 = y0.min(frame.height()) as usize;
    let y1 = y1.min(frame.height()) as usize;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let stride = frame.width() as usize * CHANNELS;
    let data = frame.data_mut();
    for row in y0..y1 {
        for col in x0..x1 {
            let offset = row * stride + col * CHANNELS;
            data[offset..offset + CHANNELS].copy_from_slice(&color);
        }
    }
}

/// Renders glyph-font text with its top-left corner at `(x, y)`,
/// skipping pixels outside the frame.
fn draw_text(frame: &mut Frame, x: u32, y: u32, text: &str, scale: u32, color: [u8; 3]) {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let scale = scale as usize;
    let mut pixels = frame.as_ndarray_mut();

    let mut pen_x = x as usize;
    let pen_y = y as usize;
    for ch in text.chars() {
        if let Some(rows) = glyph_font::glyph(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..glyph_font::GLYPH_WIDTH {
                    if (bits >> (glyph_font::GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let px = pen_x + col * scale + dx;
                            let py = pen_y + row * scale + dy;
                            if px >= width || py >= height {
                                continue;
                            }
                            for (channel, &value) in color.iter().enumerate() {
                                pixels[[py, px, channel]] = value;
                            }
                        }
                    }
                }
            }
        }
        pen_x += glyph_font::GLYPH_ADVANCE * scale;
    }
}
