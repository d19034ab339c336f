use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use crate::core::params::PipelineConfig;
use crate::core::processing::font::WatermarkFont;
use crate::error::{Error, Result};
use crate::exec::process_outcome;
use crate::types::{ImageItem, RunResult};

/// Default worker counts benchmarked in pool mode.
pub const DEFAULT_WORKER_COUNTS: [usize; 4] = [1, 2, 4, 8];

fn build_pool(workers: usize) -> Result<rayon::ThreadPool> {
    if workers == 0 {
        return Err(Error::InvalidArgument {
            arg: "workers",
            value: workers.to_string(),
        });
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("imgfan-pool-{}", i))
        .build()
        .map_err(|e| Error::WorkerPool(e.to_string()))
}

/// Processes all items on a fresh pool of exactly `workers` threads.
///
/// The elapsed time covers pool start-up, processing and teardown.
pub fn run(
    items: &[ImageItem],
    workers: usize,
    config: &PipelineConfig,
    font: &WatermarkFont,
) -> Result<RunResult> {
    let start = Instant::now();
    let pool = build_pool(workers)?;

    let processed = pool.install(|| {
        items
            .par_iter()
            .map(|item| process_outcome(item, config, font))
            .filter(|ok| *ok)
            .count()
    });
    drop(pool);

    let result = RunResult {
        worker_id: 0,
        workers,
        processed,
        failed: items.len() - processed,
        elapsed: start.elapsed(),
    };
    info!(
        "Pool with {} worker(s): {} images in {:.2}s",
        workers,
        result.processed,
        result.elapsed.as_secs_f64()
    );
    Ok(result)
}

/// Runs [`run`] once per worker count, in the given order.
pub fn benchmark(
    items: &[ImageItem],
    worker_counts: &[usize],
    config: &PipelineConfig,
    font: &WatermarkFont,
) -> Result<Vec<RunResult>> {
    if worker_counts.is_empty() {
        return Err(Error::InvalidArgument {
            arg: "workers",
            value: "[]".to_string(),
        });
    }
    worker_counts
        .iter()
        .map(|&workers| run(items, workers, config, font))
        .collect()
}
