use image::{DynamicImage, RgbImage, Rgba, RgbaImage, imageops};

use crate::core::params::WatermarkSpec;
use crate::core::processing::font::WatermarkFont;

/// Draws the watermark text onto a transparent canvas of the given size.
///
/// The text origin is placed at `((w - tw) / 2, (h - th) / 2)` with floor
/// division, where `tw x th` is the ink box. Ink that starts below or right of
/// the origin keeps that offset, and text wider than the canvas starts at a
/// negative offset and is clipped.
pub fn render_overlay(
    width: u32,
    height: u32,
    spec: &WatermarkSpec,
    font: &WatermarkFont,
) -> RgbaImage {
    let [r, g, b, a] = spec.fill;
    let mut overlay = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 0]));

    let raster = font.rasterize(&spec.text, spec.font_size);
    let Some((x0, y0, x1, y1)) = raster.bounds() else {
        return overlay;
    };
    let x = (width as i32 - (x1 - x0)).div_euclid(2);
    let y = (height as i32 - (y1 - y0)).div_euclid(2);

    for &(px, py, coverage) in &raster.pixels {
        let (dx, dy) = (x + px, y + py);
        if dx < 0 || dy < 0 || dx >= width as i32 || dy >= height as i32 {
            continue;
        }
        let alpha = (a as f32 * coverage).round().clamp(0.0, 255.0) as u8;
        let pixel = overlay.get_pixel_mut(dx as u32, dy as u32);
        if alpha > pixel[3] {
            *pixel = Rgba([r, g, b, alpha]);
        }
    }

    overlay
}

/// Rotates counter-clockwise about the canvas centre with nearest-neighbour
/// sampling. The canvas keeps its size: corners rotated out of frame are lost
/// and uncovered pixels are fully transparent.
pub fn rotate_about_center(src: &RgbaImage, angle_degrees: f32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::new(w, h);

    let (sin, cos) = (angle_degrees as f64).to_radians().sin_cos();
    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        // inverse map from the destination pixel centre back into the source
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        let sx = cx + dx * cos - dy * sin;
        let sy = cy + dx * sin + dy * cos;
        if sx >= 0.0 && sy >= 0.0 && sx < w as f64 && sy < h as f64 {
            *pixel = *src.get_pixel(sx as u32, sy as u32);
        }
    }

    out
}

/// Composites a rotated translucent text overlay onto `image` and returns the
/// flattened RGB result. `image` itself is not modified.
pub fn apply_watermark(image: &RgbImage, spec: &WatermarkSpec, font: &WatermarkFont) -> RgbImage {
    let (width, height) = image.dimensions();
    let overlay = render_overlay(width, height, spec, font);
    let rotated = rotate_about_center(&overlay, spec.angle_degrees);

    let mut composed = DynamicImage::ImageRgb8(image.clone()).into_rgba8();
    imageops::overlay(&mut composed, &rotated, 0, 0);
    DynamicImage::ImageRgba8(composed).into_rgb8()
}
