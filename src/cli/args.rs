use clap::Parser;
use std::path::PathBuf;

use imgfan::RunMode;
use imgfan::exec::nodes::DEFAULT_NODES;
use imgfan::exec::pool::DEFAULT_WORKER_COUNTS;

#[derive(Parser)]
#[command(
    name = "imgfan",
    version,
    about = "Resize and watermark a class-labelled image dataset sequentially, on a worker pool, or across simulated nodes"
)]
pub struct CliArgs {
    /// Execution strategy (sequential, pool or distributed)
    #[arg(short, long, value_enum, default_value_t = RunMode::Sequential)]
    pub mode: RunMode,

    /// Input root containing one subdirectory per class
    #[arg(short, long, default_value = "Dataset")]
    pub input: PathBuf,

    /// Output root. Defaults to output_seq, output_parallel or output_distributed
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pool mode: comma separated worker counts to benchmark
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_WORKER_COUNTS)]
    pub workers: Vec<usize>,

    /// Distributed mode: number of simulated nodes
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Output side length in pixels (default 128)
    #[arg(long)]
    pub size: Option<u32>,

    /// JPEG quality 1-100 (default 95)
    #[arg(long)]
    pub quality: Option<u8>,

    /// Watermark text. Defaults to "PROCESSED" in pool mode and "LAB EXAM" otherwise
    #[arg(long)]
    pub watermark: Option<String>,

    /// TrueType/OpenType font tried before the built-in search order
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Watermark font size in pixels (default 30)
    #[arg(long)]
    pub font_size: Option<f32>,

    /// JSON file with pipeline settings; flags above override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the run report as JSON to this path
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
