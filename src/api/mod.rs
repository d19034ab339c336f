//! High-level, ergonomic library API: prepare a dataset run, execute it with one
//! of the three strategies and get back a serializable report. Prefer these
//! entrypoints over the low-level `exec` and `core` modules when embedding.
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::metrics::{ScalingRow, overlap_factor, scaling_table};
use crate::core::params::PipelineConfig;
use crate::core::processing::font::WatermarkFont;
use crate::error::Result;
use crate::exec::{nodes, pool, sequential};
use crate::io::dataset::{class_folders, prepare_output_tree, scan_dataset};
use crate::types::{ImageItem, RunMode, RunResult};

/// A scanned dataset with its output tree created and its font resolved.
#[derive(Debug)]
pub struct PreparedRun {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub classes: Vec<String>,
    pub items: Vec<ImageItem>,
    pub config: PipelineConfig,
    pub font: WatermarkFont,
}

/// Validates `config`, scans `input_dir` and creates the mirrored class folders
/// under `output_dir`. Nothing is written when the input root is missing.
pub fn prepare(input_dir: &Path, output_dir: &Path, config: PipelineConfig) -> Result<PreparedRun> {
    config.validate()?;
    let classes = class_folders(input_dir)?;
    let items = scan_dataset(input_dir, output_dir)?;
    prepare_output_tree(output_dir, &classes)?;
    info!(
        "Prepared {} images in {} classes: {:?} -> {:?}",
        items.len(),
        classes.len(),
        input_dir,
        output_dir
    );

    let font = WatermarkFont::load(&config.watermark);
    Ok(PreparedRun {
        input_dir: input_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        classes,
        items,
        config,
        font,
    })
}

/// Summary of one run, suitable for console output and JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub mode: RunMode,
    pub started_at: DateTime<Local>,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub total_images: usize,
    pub cpu_count: usize,
    pub config: PipelineConfig,
    /// One entry per configuration (pool), per node (distributed) or a single entry
    pub results: Vec<RunResult>,
    pub scaling: Vec<ScalingRow>,
    pub wall: Duration,
    /// Distributed mode only: summed node time over wall time
    pub overlap_factor: Option<f64>,
}

impl BenchmarkReport {
    fn new(run: &PreparedRun, mode: RunMode, started_at: DateTime<Local>) -> Self {
        Self {
            mode,
            started_at,
            input_dir: run.input_dir.clone(),
            output_dir: run.output_dir.clone(),
            total_images: run.items.len(),
            cpu_count: num_cpus::get(),
            config: run.config.clone(),
            results: Vec::new(),
            scaling: Vec::new(),
            wall: Duration::ZERO,
            overlap_factor: None,
        }
    }

    /// Images processed successfully by the run. For a pool benchmark this is
    /// the count of the last configuration, since every configuration covers
    /// the whole dataset.
    pub fn processed(&self) -> usize {
        match self.mode {
            RunMode::Pool => self.results.last().map_or(0, |r| r.processed),
            RunMode::Sequential | RunMode::Distributed => {
                self.results.iter().map(|r| r.processed).sum()
            }
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

pub fn run_sequential(run: &PreparedRun) -> BenchmarkReport {
    let mut report = BenchmarkReport::new(run, RunMode::Sequential, Local::now());
    let result = sequential::run(&run.items, &run.config, &run.font);
    report.wall = result.elapsed;
    report.results = vec![result];
    report.scaling = scaling_table(&report.results);
    report
}

pub fn run_pool_benchmark(run: &PreparedRun, worker_counts: &[usize]) -> Result<BenchmarkReport> {
    let mut report = BenchmarkReport::new(run, RunMode::Pool, Local::now());
    report.results = pool::benchmark(&run.items, worker_counts, &run.config, &run.font)?;
    report.wall = report.results.iter().map(|r| r.elapsed).sum();
    report.scaling = scaling_table(&report.results);
    Ok(report)
}

pub fn run_distributed(run: &PreparedRun, node_count: usize) -> Result<BenchmarkReport> {
    let mut report = BenchmarkReport::new(run, RunMode::Distributed, Local::now());
    let outcome = nodes::run(&run.items, node_count, &run.config, &run.font)?;
    report.overlap_factor = Some(overlap_factor(&outcome.nodes, outcome.wall));
    report.wall = outcome.wall;
    report.results = outcome.nodes;
    Ok(report)
}

/// Prepares and runs `input_dir` in one call. `workers` is the list of pool
/// sizes for [`RunMode::Pool`]; for [`RunMode::Distributed`] its first entry is
/// the node count; [`RunMode::Sequential`] ignores it.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: PipelineConfig,
    mode: RunMode,
    workers: &[usize],
) -> Result<BenchmarkReport> {
    let run = prepare(input_dir, output_dir, config)?;
    match mode {
        RunMode::Sequential => Ok(run_sequential(&run)),
        RunMode::Pool => run_pool_benchmark(&run, workers),
        RunMode::Distributed => {
            let node_count = workers.first().copied().unwrap_or(nodes::DEFAULT_NODES);
            run_distributed(&run, node_count)
        }
    }
}
