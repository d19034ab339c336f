use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbImage;
use tracing::debug;

use crate::error::{Error, Result};

/// Lanczos3 resize of interleaved RGB bytes into a freshly allocated buffer.
pub fn resize_rgb_bytes(
    data: &[u8],
    original_cols: u32,
    original_rows: u32,
    target_cols: u32,
    target_rows: u32,
) -> Result<Vec<u8>> {
    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        original_cols,
        original_rows,
        data.to_vec(),
        PixelType::U8x3,
    )
    .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x3);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    Ok(dst_image.into_vec())
}

/// Resizes to exactly `target x target`, ignoring the source aspect ratio.
/// The source image is left untouched.
pub fn resize_square(image: &RgbImage, target: u32) -> Result<RgbImage> {
    let (cols, rows) = image.dimensions();
    debug!("Original size: {}x{}, New size: {}x{}", cols, rows, target, target);

    let resized = resize_rgb_bytes(image.as_raw(), cols, rows, target, target)?;
    RgbImage::from_raw(target, target, resized).ok_or_else(|| {
        Error::Resize(format!(
            "resized buffer does not match {}x{} RGB",
            target, target
        ))
    })
}
