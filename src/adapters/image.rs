use crate::utils::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::imageops;

const JPEG_QUALITY: u8 = 85;

/// A centre-cropped square photo, re-encoded as JPEG.
#[derive(Debug, Clone)]
pub struct SquarePhoto {
    pub data: Vec<u8>,
    pub side: u32,
}

/// Centre-crops raw photo bytes to a square with side `min(width, height)`
/// and re-encodes. Corrupt or unsupported input yields a decode error; the
/// caller decides whether that degrades or aborts.
pub fn center_crop_to_square(image_bytes: &[u8]) -> Result<SquarePhoto> {
    let decoded = image::load_from_memory(image_bytes)?;
    let mut rgb = decoded.to_rgb8();

    let side = rgb.width().min(rgb.height());
    let left = (rgb.width() - side) / 2;
    let top = (rgb.height() - side) / 2;
    let cropped = imageops::crop(&mut rgb, left, top, side, side).to_image();

    let mut data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY);
    cropped.write_with_encoder(encoder)?;

    Ok(SquarePhoto { data, side })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_wide_image_cropped_to_height() {
        let photo = center_crop_to_square(&png_bytes(100, 60)).unwrap();
        assert_eq!(photo.side, 60);

        let out = image::load_from_memory(&photo.data).unwrap();
        assert_eq!(out.width(), 60);
        assert_eq!(out.height(), 60);
    }

    #[test]
    fn test_tall_image_cropped_to_width() {
        let photo = center_crop_to_square(&png_bytes(40, 90)).unwrap();
        assert_eq!(photo.side, 40);
    }

    #[test]
    fn test_square_image_passes_through_same_size() {
        let photo = center_crop_to_square(&png_bytes(64, 64)).unwrap();
        assert_eq!(photo.side, 64);
    }

    #[test]
    fn test_corrupt_input_is_a_decode_error() {
        assert!(center_crop_to_square(b"definitely not an image").is_err());
    }
}
