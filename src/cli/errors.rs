use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Worker counts must be positive integers, got: {workers}")]
    InvalidWorkers { workers: String },

    #[error("At least one worker count is required")]
    MissingWorkers,

    #[error("Node count must be greater than 0")]
    ZeroNodes,

    #[error(transparent)]
    Imgfan(#[from] imgfan::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
