#![doc = r#"
imgfan: resize-and-watermark an image dataset three ways and compare timings.

This crate takes a directory of class-labelled images (`<root>/<class>/<file>`),
runs every image through a fixed transform (decode, convert to RGB, Lanczos3
resize to a square, rotated translucent text watermark, save) and writes the
result to a mirrored output tree. The same transform can be fanned out
sequentially, on a fixed-size worker pool, or over simulated "nodes" that each
own a contiguous chunk of the dataset. Runs report processed counts, wall-clock
time, speedup and efficiency. It powers the `imgfan` CLI and can be embedded in
your own Rust applications.

Add dependency
--------------
```toml
[dependencies]
imgfan = "0.1"
```

Quick start: process a dataset sequentially
-------------------------------------------
```rust,no_run
use std::path::Path;
use imgfan::{PipelineConfig, prepare, run_sequential};

fn main() -> imgfan::Result<()> {
    let run = prepare(Path::new("Dataset"), Path::new("output_seq"), PipelineConfig::default())?;
    let report = run_sequential(&run);
    println!(
        "processed={} in {:.2}s",
        report.processed(),
        report.wall.as_secs_f64()
    );
    Ok(())
}
```

Benchmark a worker pool
-----------------------
```rust,no_run
use std::path::Path;
use imgfan::{PipelineConfig, prepare, run_pool_benchmark};

fn main() -> imgfan::Result<()> {
    let config = PipelineConfig::default().with_watermark_text("PROCESSED");
    let run = prepare(Path::new("Dataset"), Path::new("output_parallel"), config)?;
    let report = run_pool_benchmark(&run, &[1, 2, 4, 8])?;
    for row in &report.scaling {
        println!(
            "{} workers: {:.2}s, {:.2}x, {:.1}%",
            row.workers, row.elapsed_secs, row.speedup, row.efficiency
        );
    }
    Ok(())
}
```

Transform in memory
-------------------
```rust,no_run
use imgfan::{OutputFormat, PipelineConfig, WatermarkFont, transform_bytes};

fn main() -> imgfan::Result<()> {
    let config = PipelineConfig::default();
    let font = WatermarkFont::load(&config.watermark);
    let input = std::fs::read("cat.png")?;
    let jpeg = transform_bytes(&input, OutputFormat::Jpeg, &config, &font)?;
    std::fs::write("cat_small.jpg", jpeg)?;
    Ok(())
}
```

Partition work yourself
-----------------------
```rust
use imgfan::partition;

let items: Vec<u32> = (0..8).collect();
let chunks = partition(&items, 3).unwrap();
let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
assert_eq!(sizes, vec![2, 2, 4]);
```

Error handling
--------------
All public functions return `imgfan::Result<T>`. A missing input directory is the
only run-level failure once the configuration is valid; a bad image only
counts as a failure for that image.

```rust,no_run
use std::path::Path;
use imgfan::{Error, PipelineConfig, prepare};

fn main() {
    match prepare(Path::new("Dataset"), Path::new("out"), PipelineConfig::default()) {
        Ok(run) => println!("{} images", run.items.len()),
        Err(Error::InputNotFound { path }) => eprintln!("no dataset at {}", path.display()),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`]: high-level, ergonomic entry points and `BenchmarkReport`.
- [`core`]: transform pipeline, partitioner, parameters and metrics.
- [`exec`]: sequential, pool and node execution strategies.
- [`io`]: dataset scanning and image writers.
- [`types`]: `RunMode`, `OutputFormat`, `ImageItem`, `RunResult`.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod exec;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{PipelineConfig, WatermarkSpec};
pub use error::{Error, Result};
pub use types::{ImageItem, OutputFormat, RunMode, RunResult};

// Core operations
pub use crate::core::metrics::{ScalingRow, efficiency, overlap_factor, scaling_table, speedup};
pub use crate::core::partition::{WorkChunk, partition};
pub use crate::core::processing::font::WatermarkFont;
pub use crate::core::processing::pipeline::{
    ProcessedImage, decode_rgb, process_item, transform, transform_bytes,
};
pub use crate::core::processing::save::{encode_processed_image, save_processed_image};
pub use io::dataset::{class_folders, prepare_output_tree, scan_dataset};

// High-level API re-exports
pub use api::{
    BenchmarkReport, PreparedRun, prepare, process_directory, run_distributed,
    run_pool_benchmark, run_sequential,
};
pub use exec::DistributedRun;
