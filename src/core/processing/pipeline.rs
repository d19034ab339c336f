use std::fs;

use image::RgbImage;
use tracing::debug;

use crate::core::params::PipelineConfig;
use crate::core::processing::font::WatermarkFont;
use crate::core::processing::resize::resize_square;
use crate::core::processing::save::{encode_processed_image, save_processed_image};
use crate::core::processing::watermark::apply_watermark;
use crate::error::Result;
use crate::types::{ImageItem, OutputFormat};

/// Square, watermarked RGB image ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub width: u32,
    pub height: u32,
    /// Interleaved RGB, `width * height * 3` bytes
    pub rgb: Vec<u8>,
}

impl From<RgbImage> for ProcessedImage {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            rgb: image.into_raw(),
        }
    }
}

/// Decodes any supported format into 3-channel RGB; alpha and palettes are dropped.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage> {
    let decoded = image::load_from_memory(bytes)?;
    debug!(
        "Decoded {}x{} {:?}",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );
    Ok(decoded.into_rgb8())
}

/// Decode, resize to `target_size` square and watermark.
pub fn transform(
    bytes: &[u8],
    config: &PipelineConfig,
    font: &WatermarkFont,
) -> Result<ProcessedImage> {
    let rgb = decode_rgb(bytes)?;
    let resized = resize_square(&rgb, config.target_size)?;
    let watermarked = apply_watermark(&resized, &config.watermark, font);
    Ok(ProcessedImage::from(watermarked))
}

/// `transform` followed by in-memory encoding.
pub fn transform_bytes(
    bytes: &[u8],
    format: OutputFormat,
    config: &PipelineConfig,
    font: &WatermarkFont,
) -> Result<Vec<u8>> {
    let processed = transform(bytes, config, font)?;
    encode_processed_image(&processed, format, config.quality)
}

/// Reads, transforms and writes one dataset item.
pub fn process_item(item: &ImageItem, config: &PipelineConfig, font: &WatermarkFont) -> Result<()> {
    let bytes = fs::read(&item.source)?;
    let processed = transform(&bytes, config, font)?;
    save_processed_image(&processed, &item.destination, config.quality)?;
    debug!("Processed {:?} -> {:?}", item.source, item.destination);
    Ok(())
}
