use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;

use imgfan::{
    Error, PipelineConfig, PreparedRun, RunMode, WatermarkFont, prepare, process_directory,
    run_distributed, run_pool_benchmark, run_sequential,
};

/// `Dataset/cat` with 3 images and `Dataset/dog` with 5, in assorted formats,
/// sizes and colour modes.
fn two_class_dataset() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Dataset");
    fs::create_dir_all(root.join("cat")).unwrap();
    fs::create_dir_all(root.join("dog")).unwrap();

    let gradient = RgbImage::from_fn(200, 150, |x, y| Rgb([x as u8, y as u8, 128]));
    DynamicImage::ImageRgb8(gradient.clone())
        .save(root.join("cat").join("c1.png"))
        .unwrap();
    DynamicImage::ImageRgb8(gradient)
        .save(root.join("cat").join("c2.jpg"))
        .unwrap();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 256, Rgb([10, 20, 30])))
        .save(root.join("cat").join("c3.bmp"))
        .unwrap();

    DynamicImage::ImageRgba8(RgbaImage::from_pixel(90, 90, Rgba([255, 0, 0, 100])))
        .save(root.join("dog").join("d1.png"))
        .unwrap();
    DynamicImage::ImageLuma8(GrayImage::from_pixel(33, 17, Luma([77])))
        .save(root.join("dog").join("d2.png"))
        .unwrap();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb([0, 255, 0])))
        .save(root.join("dog").join("d3.gif"))
        .unwrap();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 300, Rgb([250, 250, 250])))
        .save(root.join("dog").join("d4.jpeg"))
        .unwrap();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([1, 2, 3])))
        .save(root.join("dog").join("d5.png"))
        .unwrap();

    (dir, root)
}

fn add_corrupt_image(root: &Path) {
    fs::write(root.join("dog").join("broken.jpg"), b"this is not a jpeg").unwrap();
}

fn prepared(root: &Path, output: &Path, text: &str) -> PreparedRun {
    let config = PipelineConfig::default().with_watermark_text(text);
    let mut run = prepare(root, output, config).unwrap();
    run.font = WatermarkFont::builtin();
    run
}

fn assert_square_rgb(path: &Path, size: u32) {
    let img = image::open(path).unwrap();
    assert_eq!((img.width(), img.height()), (size, size), "{path:?}");
}

#[test]
fn sequential_processes_every_image_and_mirrors_classes() {
    let (dir, root) = two_class_dataset();
    let output = dir.path().join("output_seq");
    let run = prepared(&root, &output, "LAB EXAM");
    assert_eq!(run.items.len(), 8);
    assert_eq!(run.classes, vec!["cat".to_string(), "dog".to_string()]);

    let report = run_sequential(&run);
    assert_eq!(report.mode, RunMode::Sequential);
    assert_eq!(report.processed(), 8);
    assert_eq!(report.results[0].failed, 0);

    for item in &run.items {
        assert!(item.destination.starts_with(output.join(&item.class_label)));
        assert_square_rgb(&item.destination, 128);
    }
    // a jpeg destination keeps its name and format
    let jpeg = image::open(output.join("cat").join("c2.jpg")).unwrap();
    assert_eq!(jpeg.color(), image::ColorType::Rgb8);
}

#[test]
fn one_corrupt_image_does_not_stop_the_batch() {
    let (dir, root) = two_class_dataset();
    add_corrupt_image(&root);
    let output = dir.path().join("out");
    let run = prepared(&root, &output, "LAB EXAM");
    assert_eq!(run.items.len(), 9);

    let report = run_sequential(&run);
    assert_eq!(report.results[0].processed, 8);
    assert_eq!(report.results[0].failed, 1);
    assert!(!output.join("dog").join("broken.jpg").exists());
    assert!(output.join("dog").join("d5.png").exists());
}

#[test]
fn pool_benchmark_covers_every_configuration() {
    let (dir, root) = two_class_dataset();
    add_corrupt_image(&root);
    let run = prepared(&root, &dir.path().join("output_parallel"), "PROCESSED");

    let report = run_pool_benchmark(&run, &[1, 2, 3]).unwrap();
    assert_eq!(report.results.len(), 3);
    for (result, workers) in report.results.iter().zip([1, 2, 3]) {
        assert_eq!(result.workers, workers);
        assert_eq!(result.processed, 8);
        assert_eq!(result.failed, 1);
    }
    assert_eq!(report.scaling.len(), 3);
    assert!((report.scaling[0].speedup - 1.0).abs() < 1e-9);
    assert!((report.scaling[0].efficiency - 100.0).abs() < 1e-9);
    assert_eq!(report.processed(), 8);
}

#[test]
fn pool_rejects_zero_workers() {
    let (dir, root) = two_class_dataset();
    let run = prepared(&root, &dir.path().join("out"), "PROCESSED");
    assert!(matches!(
        run_pool_benchmark(&run, &[2, 0]),
        Err(Error::InvalidArgument { arg: "workers", .. })
    ));
    assert!(run_pool_benchmark(&run, &[]).is_err());
}

#[test]
fn distributed_nodes_own_contiguous_chunks() {
    let (dir, root) = two_class_dataset();
    add_corrupt_image(&root);
    let run = prepared(&root, &dir.path().join("output_distributed"), "LAB EXAM");

    let report = run_distributed(&run, 2).unwrap();
    let ids: Vec<usize> = report.results.iter().map(|r| r.worker_id).collect();
    assert_eq!(ids, vec![1, 2]);
    // 9 items: base 4, last node takes 5
    assert_eq!(report.results[0].total(), 4);
    assert_eq!(report.results[1].total(), 5);
    assert_eq!(report.processed(), 8);
    assert_eq!(report.results.iter().map(|r| r.failed).sum::<usize>(), 1);
    assert!(report.overlap_factor.unwrap() > 0.0);
}

#[test]
fn more_nodes_than_images_is_fine() {
    let (dir, root) = two_class_dataset();
    let run = prepared(&root, &dir.path().join("out"), "LAB EXAM");

    let report = run_distributed(&run, 12).unwrap();
    assert_eq!(report.results.len(), 12);
    assert!(report.results[..11].iter().all(|r| r.total() == 0));
    assert_eq!(report.results[11].processed, 8);
}

#[test]
fn missing_input_root_aborts_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output_seq");
    let err = prepare(
        &dir.path().join("Dataset"),
        &output,
        PipelineConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InputNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn reruns_produce_identical_files() {
    let (dir, root) = two_class_dataset();
    let first_out = dir.path().join("first");
    let second_out = dir.path().join("second");
    run_sequential(&prepared(&root, &first_out, "LAB EXAM"));
    run_sequential(&prepared(&root, &second_out, "LAB EXAM"));

    for class in ["cat", "dog"] {
        for entry in fs::read_dir(first_out.join(class)).unwrap() {
            let entry = entry.unwrap();
            let a = fs::read(entry.path()).unwrap();
            let b = fs::read(second_out.join(class).join(entry.file_name())).unwrap();
            assert_eq!(a, b, "{:?}", entry.file_name());
        }
    }
}

#[test]
fn process_directory_and_json_report() {
    let (dir, root) = two_class_dataset();
    let output = dir.path().join("out");
    let config = PipelineConfig {
        target_size: 48,
        ..Default::default()
    };

    let report = process_directory(&root, &output, config, RunMode::Distributed, &[3]).unwrap();
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.processed(), 8);
    assert_square_rgb(&output.join("dog").join("d4.jpeg"), 48);

    let json_path = dir.path().join("report.json");
    report.write_json(&json_path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["mode"], "Distributed");
    assert_eq!(value["total_images"], 8);
    assert_eq!(value["config"]["target_size"], 48);
}
