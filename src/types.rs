//! Shared types and enums used across imgfan.
//! Includes `RunMode`, `OutputFormat`, the enumerated `ImageItem` and the
//! per-worker `RunResult`.
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum RunMode {
    Sequential,
    Pool,
    Distributed,
}

impl RunMode {
    /// Watermark text used when none is configured.
    pub fn default_watermark(&self) -> &'static str {
        match self {
            RunMode::Sequential | RunMode::Distributed => "LAB EXAM",
            RunMode::Pool => "PROCESSED",
        }
    }

    pub fn default_output_dir(&self) -> &'static str {
        match self {
            RunMode::Sequential => "output_seq",
            RunMode::Pool => "output_parallel",
            RunMode::Distributed => "output_distributed",
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Sequential => write!(f, "Sequential"),
            RunMode::Pool => write!(f, "Pool"),
            RunMode::Distributed => write!(f, "Distributed"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum OutputFormat {
    Jpeg, // Lossy, honours quality
    Png,
    Bmp,
    Gif,
}

impl OutputFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "bmp" => Some(OutputFormat::Bmp),
            "gif" => Some(OutputFormat::Gif),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// One input image: where it comes from, where it goes and which class folder it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub class_label: String,
    pub file_name: String,
}

impl ImageItem {
    pub fn new(output_root: &Path, source: PathBuf, class_label: &str, file_name: &str) -> Self {
        Self {
            destination: output_root.join(class_label).join(file_name),
            source,
            class_label: class_label.to_string(),
            file_name: file_name.to_string(),
        }
    }
}

/// Outcome of one worker (or one whole configuration) once it has finished.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub worker_id: usize,
    /// Number of workers this result stands for; 1 for a single node.
    pub workers: usize,
    pub processed: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl RunResult {
    pub fn total(&self) -> usize {
        self.processed + self.failed
    }
}
