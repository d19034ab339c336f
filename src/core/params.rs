use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Text overlay drawn onto every processed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkSpec {
    pub text: String,
    /// Em size in pixels for scalable fonts. The built-in bitmap font ignores it.
    pub font_size: f32,
    /// Tried before the default font search order.
    pub font_path: Option<PathBuf>,
    /// RGBA fill; alpha is the maximum opacity of fully covered text pixels
    pub fill: [u8; 4],
    /// Counter-clockwise rotation of the overlay
    pub angle_degrees: f32,
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            text: "LAB EXAM".to_string(),
            font_size: 30.0,
            font_path: None,
            fill: [255, 255, 255, 80],
            angle_degrees: 30.0,
        }
    }
}

/// Transform parameters suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Output side length; images are resized to `target_size x target_size`
    pub target_size: u32,
    /// JPEG quality (1..=100); ignored by lossless output formats
    pub quality: u8,
    pub watermark: WatermarkSpec,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_size: 128,
            quality: 95,
            watermark: WatermarkSpec::default(),
        }
    }
}

impl PipelineConfig {
    /// Largest side the JPEG writer can encode.
    pub const MAX_SIZE: u32 = u16::MAX as u32;

    pub fn with_watermark_text(mut self, text: impl Into<String>) -> Self {
        self.watermark.text = text.into();
        self
    }

    /// Loads a JSON config file. Missing fields take their defaults, except the
    /// watermark text, which falls back to `default_text`.
    pub fn from_json_file(path: &Path, default_text: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw, default_text)?;
        config.validate()?;
        Ok(config)
    }

    fn from_json_str(raw: &str, default_text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let has_text = value.pointer("/watermark/text").is_some();
        let mut config: PipelineConfig = serde_json::from_value(value)?;
        if !has_text {
            config.watermark.text = default_text.to_string();
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_size == 0 || self.target_size > Self::MAX_SIZE {
            return Err(Error::InvalidSize {
                size: self.target_size,
                max: Self::MAX_SIZE,
            });
        }
        if !(1..=100).contains(&self.quality) {
            return Err(Error::InvalidArgument {
                arg: "quality",
                value: self.quality.to_string(),
            });
        }
        if !(self.watermark.font_size.is_finite() && self.watermark.font_size > 0.0) {
            return Err(Error::InvalidArgument {
                arg: "font_size",
                value: self.watermark.font_size.to_string(),
            });
        }
        if !self.watermark.angle_degrees.is_finite() {
            return Err(Error::InvalidArgument {
                arg: "angle_degrees",
                value: self.watermark.angle_degrees.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.target_size, 128);
        assert_eq!(config.quality, 95);
        assert_eq!(config.watermark.font_size, 30.0);
        assert_eq!(config.watermark.fill, [255, 255, 255, 80]);
        assert_eq!(config.watermark.angle_degrees, 30.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{ "target_size": 64, "watermark": { "text": "HELLO" } }"#)
                .unwrap();
        assert_eq!(config.target_size, 64);
        assert_eq!(config.quality, 95);
        assert_eq!(config.watermark.text, "HELLO");
        assert_eq!(config.watermark.angle_degrees, 30.0);
    }

    #[test]
    fn config_without_text_takes_the_given_default() {
        let config =
            PipelineConfig::from_json_str(r#"{ "watermark": { "font_size": 12.0 } }"#, "PROCESSED")
                .unwrap();
        assert_eq!(config.watermark.text, "PROCESSED");
        assert_eq!(config.watermark.font_size, 12.0);

        let empty = PipelineConfig::from_json_str("{}", "PROCESSED").unwrap();
        assert_eq!(empty.watermark.text, "PROCESSED");

        let explicit =
            PipelineConfig::from_json_str(r#"{ "watermark": { "text": "" } }"#, "PROCESSED")
                .unwrap();
        assert_eq!(explicit.watermark.text, "");
    }

    #[test]
    fn config_file_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "quality": 0 }"#).unwrap();
        assert!(matches!(
            PipelineConfig::from_json_file(&path, "LAB EXAM"),
            Err(Error::InvalidArgument { arg: "quality", .. })
        ));
        assert!(PipelineConfig::from_json_file(&dir.path().join("missing.json"), "X").is_err());
    }

    #[test]
    fn rejects_zero_size_and_bad_quality() {
        let zero = PipelineConfig {
            target_size: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(Error::InvalidSize { size: 0, .. })));

        let bad_quality = PipelineConfig {
            quality: 0,
            ..Default::default()
        };
        assert!(matches!(
            bad_quality.validate(),
            Err(Error::InvalidArgument { arg: "quality", .. })
        ));
    }
}
