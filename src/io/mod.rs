//! I/O layer: dataset scanning (`dataset`) and image `writers`.
pub mod dataset;
pub use dataset::{class_folders, prepare_output_tree, scan_dataset};

pub mod writers;
