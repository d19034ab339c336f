//! Crate-level error type and `Result` alias.
//! Converts underlying I/O, image codec and config parsing errors, and provides
//! semantic variants for argument validation and per-stage processing failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Input directory '{}' not found", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Size must be between 1 and {max}, got: {size}")]
    InvalidSize { size: u32, max: u32 },

    #[error("Unsupported output format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl Error {
    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }

    pub fn encode<E: std::fmt::Display>(e: E) -> Self {
        Error::Encode(e.to_string())
    }
}
