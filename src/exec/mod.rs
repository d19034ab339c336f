//! Execution strategies over a scanned item list.
//!
//! All three run the same per-item transform and differ only in how the work
//! is fanned out:
//! - [`sequential`]: one worker, enumeration order.
//! - [`pool`]: a dedicated thread pool of fixed size pulling items from a
//!   shared work-stealing queue.
//! - [`nodes`]: the list is partitioned into contiguous chunks, one thread
//!   ("node") per chunk, results reported over a channel and joined by a
//!   single coordinator.
//!
//! A failing item is logged and counted; it never stops its siblings.
pub mod nodes;
pub mod pool;
pub mod sequential;

use std::time::Instant;

use tracing::{info, warn};

use crate::core::params::PipelineConfig;
use crate::core::processing::font::WatermarkFont;
use crate::core::processing::pipeline::process_item;
use crate::types::{ImageItem, RunResult};

pub use nodes::DistributedRun;

/// Runs one item and folds any failure into `false`.
pub fn process_outcome(item: &ImageItem, config: &PipelineConfig, font: &WatermarkFont) -> bool {
    match process_item(item, config, font) {
        Ok(()) => true,
        Err(e) => {
            warn!("Error processing {}: {}", item.file_name, e);
            false
        }
    }
}

/// Processes `items` in order on the calling thread and times the whole chunk.
pub fn run_chunk(
    worker_id: usize,
    items: &[ImageItem],
    config: &PipelineConfig,
    font: &WatermarkFont,
) -> RunResult {
    let start = Instant::now();
    let mut processed = 0;
    let mut current_class: Option<&str> = None;

    for item in items {
        if current_class != Some(item.class_label.as_str()) {
            info!(
                "Worker {}: processing images from '{}' folder",
                worker_id, item.class_label
            );
            current_class = Some(item.class_label.as_str());
        }
        if process_outcome(item, config, font) {
            processed += 1;
        }
    }

    RunResult {
        worker_id,
        workers: 1,
        processed,
        failed: items.len() - processed,
        elapsed: start.elapsed(),
    }
}
