use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::processing::pipeline::ProcessedImage;
use crate::error::{Error, Result};
use crate::io::writers::encode_rgb;
use crate::types::OutputFormat;

/// Encodes a processed image in memory.
pub fn encode_processed_image(
    image: &ProcessedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>> {
    encode_rgb(image.width, image.height, &image.rgb, format, quality)
}

/// Writes a processed image to `output`, picking the format from its extension.
pub fn save_processed_image(image: &ProcessedImage, output: &Path, quality: u8) -> Result<()> {
    let format = OutputFormat::from_path(output).ok_or_else(|| Error::UnsupportedFormat {
        path: output.to_path_buf(),
    })?;
    let bytes = encode_processed_image(image, format, quality)?;
    fs::write(output, &bytes)?;
    debug!(
        "save_processed_image: {:?} saved as {:?} ({} bytes)",
        output,
        format,
        bytes.len()
    );
    Ok(())
}
