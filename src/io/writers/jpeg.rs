use jpeg_encoder::{ColorType, Encoder};

use crate::error::{Error, Result};

/// Encodes interleaved RGB bytes as a baseline JPEG at `quality` (1..=100).
pub fn encode_rgb_jpeg(cols: u32, rows: u32, rgb_data: &[u8], quality: u8) -> Result<Vec<u8>> {
    let (cols, rows) = jpeg_dimensions(cols, rows)?;
    let mut buffer = Vec::with_capacity(rgb_data.len() / 4);
    let encoder = Encoder::new(&mut buffer, quality);
    encoder
        .encode(rgb_data, cols, rows, ColorType::Rgb)
        .map_err(Error::encode)?;
    Ok(buffer)
}

fn jpeg_dimensions(cols: u32, rows: u32) -> Result<(u16, u16)> {
    let cols = u16::try_from(cols).map_err(Error::encode)?;
    let rows = u16::try_from(rows).map_err(Error::encode)?;
    Ok((cols, rows))
}
