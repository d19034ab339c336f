use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use imgfan::{
    BenchmarkReport, PipelineConfig, PreparedRun, RunMode, prepare, run_distributed,
    run_pool_benchmark, run_sequential,
};

use super::args::CliArgs;
use super::errors::AppError;

const RULE_WIDTH: usize = 60;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Config file (or defaults) first, then any explicit flags on top. The mode's
/// watermark text applies unless the file or `--watermark` sets one.
fn build_config(args: &CliArgs) -> Result<PipelineConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path, args.mode.default_watermark())?,
        None => PipelineConfig::default().with_watermark_text(args.mode.default_watermark()),
    };

    if let Some(size) = args.size {
        config.target_size = size;
    }
    if let Some(quality) = args.quality {
        config.quality = quality;
    }
    if let Some(text) = &args.watermark {
        config.watermark.text = text.clone();
    }
    if let Some(font) = &args.font {
        config.watermark.font_path = Some(font.clone());
    }
    if let Some(font_size) = args.font_size {
        config.watermark.font_size = font_size;
    }

    config.validate()?;
    Ok(config)
}

fn validate_fan_out(args: &CliArgs) -> Result<(), AppError> {
    match args.mode {
        RunMode::Pool => {
            if args.workers.is_empty() {
                return Err(AppError::MissingWorkers);
            }
            if args.workers.contains(&0) {
                let workers: Vec<String> = args.workers.iter().map(|w| w.to_string()).collect();
                return Err(AppError::InvalidWorkers {
                    workers: workers.join(","),
                });
            }
        }
        RunMode::Distributed => {
            if args.nodes == 0 {
                return Err(AppError::ZeroNodes);
            }
        }
        RunMode::Sequential => {}
    }
    Ok(())
}

fn print_banner(mode: RunMode) {
    rule();
    match mode {
        RunMode::Sequential => println!("Sequential Image Processing"),
        RunMode::Pool => println!("Parallel Image Processing with a Worker Pool"),
        RunMode::Distributed => println!("Simulated Distributed Image Processing"),
    }
    rule();
}

fn print_prepared(run: &PreparedRun, mode: RunMode) {
    println!(
        "Found {} class folders: {}",
        run.classes.len(),
        run.classes.join(", ")
    );
    println!("Images to process: {}", run.items.len());
    if mode == RunMode::Pool {
        println!("Available CPU cores: {}", num_cpus::get());
    }
    println!();
}

fn print_sequential(report: &BenchmarkReport) {
    rule();
    println!("Processing Complete!");
    println!("Total images processed: {}", report.processed());
    println!(
        "Sequential Processing Time: {:.2} seconds",
        report.wall.as_secs_f64()
    );
    rule();
}

fn print_pool(report: &BenchmarkReport) {
    for row in &report.scaling {
        println!(
            "{} worker(s): completed {} images in {:.2} seconds",
            row.workers, row.processed, row.elapsed_secs
        );
    }

    println!();
    rule();
    println!("Performance Analysis:");
    rule();
    println!(
        "{:<10} | {:<10} | {:<10} | {:<10}",
        "Workers", "Time (s)", "Speedup", "Efficiency"
    );
    println!("{}", "-".repeat(RULE_WIDTH));
    for row in &report.scaling {
        println!(
            "{:<10} | {:<10.2} | {:<9.2}x | {:<9.2}%",
            row.workers, row.elapsed_secs, row.speedup, row.efficiency
        );
    }
    rule();

    if let (Some(first), Some(last)) = (report.scaling.first(), report.scaling.last()) {
        let base = report
            .scaling
            .iter()
            .find(|r| r.workers == 1)
            .unwrap_or(first);
        println!("Key Parallel Computing Metrics:");
        println!(
            "- Base Time ({} worker(s)): {:.2} seconds",
            base.workers, base.elapsed_secs
        );
        println!(
            "- Time with {} workers: {:.2} seconds",
            last.workers, last.elapsed_secs
        );
        println!("- Speedup at {} workers: {:.2}x", last.workers, last.speedup);
        rule();
    }
}

fn print_distributed(report: &BenchmarkReport) {
    for node in &report.results {
        println!(
            "Node {} processed {} images in {:.1}s",
            node.worker_id,
            node.processed,
            node.elapsed.as_secs_f64()
        );
    }
    println!(
        "Total distributed time: {:.1}s",
        report.wall.as_secs_f64()
    );
    if let Some(factor) = report.overlap_factor {
        println!("Efficiency: {:.2}x over sequential", factor);
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    validate_fan_out(&args)?;
    let config = build_config(&args)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.mode.default_output_dir()));

    print_banner(args.mode);
    info!("Input directory: {:?}", args.input);
    info!("Output directory: {:?}", output);

    let prepared = prepare(&args.input, &output, config).map_err(AppError::from)?;
    print_prepared(&prepared, args.mode);

    let report = match args.mode {
        RunMode::Sequential => {
            let report = run_sequential(&prepared);
            print_sequential(&report);
            report
        }
        RunMode::Pool => {
            let report = run_pool_benchmark(&prepared, &args.workers).map_err(AppError::from)?;
            print_pool(&report);
            report
        }
        RunMode::Distributed => {
            let report = run_distributed(&prepared, args.nodes).map_err(AppError::from)?;
            print_distributed(&report);
            report
        }
    };

    if let Some(path) = &args.report_json {
        report.write_json(path).map_err(AppError::from)?;
        info!("Report written to {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["imgfan"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    fn write_config(dir: &tempfile::TempDir, json: &str) -> String {
        let path = dir.path().join("config.json");
        std::fs::write(&path, json).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn mode_picks_the_default_watermark() {
        let seq = build_config(&args(&[])).unwrap();
        assert_eq!(seq.watermark.text, "LAB EXAM");
        let pool = build_config(&args(&["--mode", "pool"])).unwrap();
        assert_eq!(pool.watermark.text, "PROCESSED");
    }

    #[test]
    fn config_file_without_text_keeps_the_mode_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{ "target_size": 64 }"#);
        let config = build_config(&args(&["--mode", "pool", "--config", &path])).unwrap();
        assert_eq!(config.watermark.text, "PROCESSED");
        assert_eq!(config.target_size, 64);
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{ "target_size": 64, "quality": 50, "watermark": { "text": "FILE" } }"#,
        );
        let config = build_config(&args(&[
            "--mode", "pool", "--config", &path, "--size", "32", "--watermark", "FLAG",
        ]))
        .unwrap();
        assert_eq!(config.target_size, 32);
        assert_eq!(config.quality, 50);
        assert_eq!(config.watermark.text, "FLAG");

        let from_file = build_config(&args(&["--mode", "pool", "--config", &path])).unwrap();
        assert_eq!(from_file.watermark.text, "FILE");
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        assert!(build_config(&args(&["--size", "0"])).is_err());
        assert!(validate_fan_out(&args(&["--mode", "pool", "--workers", "2,0"])).is_err());
        assert!(validate_fan_out(&args(&["--mode", "distributed", "--nodes", "0"])).is_err());
    }
}
