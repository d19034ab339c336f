//! Encoders for processed images. JPEG goes through `jpeg-encoder` so the
//! quality setting is honoured; PNG, BMP and GIF are written with `image`.
pub mod jpeg;

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::error::{Error, Result};
use crate::types::OutputFormat;

pub use jpeg::encode_rgb_jpeg;

/// Encodes an RGB buffer in the given format. `quality` only affects JPEG.
pub fn encode_rgb(
    cols: u32,
    rows: u32,
    rgb_data: &[u8],
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>> {
    let image_format = match format {
        OutputFormat::Jpeg => return encode_rgb_jpeg(cols, rows, rgb_data, quality),
        OutputFormat::Png => ImageFormat::Png,
        OutputFormat::Bmp => ImageFormat::Bmp,
        OutputFormat::Gif => ImageFormat::Gif,
    };

    let rgb = RgbImage::from_raw(cols, rows, rgb_data.to_vec()).ok_or_else(|| {
        Error::Encode(format!("buffer does not match {}x{} RGB", cols, rows))
    })?;
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb).write_to(&mut cursor, image_format)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_format_round_trips_dimensions() {
        let rgb = vec![200u8; 12 * 12 * 3];
        for format in [
            OutputFormat::Jpeg,
            OutputFormat::Png,
            OutputFormat::Bmp,
            OutputFormat::Gif,
        ] {
            let bytes = encode_rgb(12, 12, &rgb, format, 95).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (12, 12), "{format:?}");
        }
    }

    #[test]
    fn lossless_formats_keep_pixels() {
        let rgb: Vec<u8> = (0..4 * 4 * 3).map(|i| i as u8 * 5).collect();
        let bytes = encode_rgb(4, 4, &rgb, OutputFormat::Png, 95).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().into_rgb8();
        assert_eq!(decoded.into_raw(), rgb);
    }

    #[test]
    fn short_buffer_is_an_error() {
        assert!(encode_rgb(4, 4, &[0u8; 5], OutputFormat::Png, 95).is_err());
    }
}
