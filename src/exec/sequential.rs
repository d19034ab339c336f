use tracing::info;

use crate::core::params::PipelineConfig;
use crate::core::processing::font::WatermarkFont;
use crate::exec::run_chunk;
use crate::types::{ImageItem, RunResult};

/// Processes every item one after another on the calling thread.
pub fn run(items: &[ImageItem], config: &PipelineConfig, font: &WatermarkFont) -> RunResult {
    info!("Starting sequential processing of {} images", items.len());
    let result = run_chunk(1, items, config, font);
    info!(
        "Sequential processing complete: {} processed, {} failed in {:.2}s",
        result.processed,
        result.failed,
        result.elapsed.as_secs_f64()
    );
    result
}
