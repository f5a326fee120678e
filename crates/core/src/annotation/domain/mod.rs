pub mod face_annotator;
pub mod glyph_font;
