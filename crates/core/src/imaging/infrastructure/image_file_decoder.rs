use crate::imaging::domain::image_decoder::ImageDecoder;
use crate::shared::frame::Frame;

/// Decodes image-file bytes with the `image` crate, converting any
/// supported source format to RGB.
pub struct ImageFileDecoder;

impl ImageFileDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageDecoder for ImageFileDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::load_from_memory(bytes)?.to_rgb8();
        let (width, height) = (img.width(), img.height());
        Ok(Frame::new(img.into_raw(), width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_dimensions_and_pixels() {
        let bytes = png_bytes(20, 10, [50, 100, 200]);
        let frame = ImageFileDecoder::new().decode(&bytes).unwrap();
        assert_eq!(frame.width(), 20);
        assert_eq!(frame.height(), 10);
        let arr = frame.as_ndarray();
        assert_eq!(arr[[0, 0, 0]], 50);
        assert_eq!(arr[[9, 19, 2]], 200);
    }

    #[test]
    fn test_decode_jpeg_bytes() {
        let img = image::RgbImage::from_pixel(16, 16, image::Rgb([128, 128, 128]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .unwrap();
        let frame = ImageFileDecoder::new().decode(&bytes).unwrap();
        assert_eq!(frame.width(), 16);
        assert_eq!(frame.height(), 16);
    }

    #[test]
    fn test_decode_garbage_returns_error() {
        assert!(ImageFileDecoder::new().decode(b"not an image").is_err());
    }
}
