//! End-to-end pipeline tests with the real backend: real JPEG/PNG sources
//! in, real WebP variants out.

use respimg::imaging::{Quality, RustBackend};
use respimg::variants::{self, VariantConfig, VariantEvent, VariantStatus};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::SystemTime;
use tempfile::TempDir;

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(path).unwrap();
}

fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    img.save(path).unwrap();
}

fn config(sizes: &[u32]) -> VariantConfig {
    VariantConfig {
        prefix: "infra".to_string(),
        sizes: sizes.to_vec(),
        quality: Quality::new(80),
        force: false,
        dry_run: false,
    }
}

fn run(dir: &Path, config: &VariantConfig) -> (variants::RunStats, Vec<VariantEvent>) {
    let mut events = Vec::new();
    let stats = variants::generate(&RustBackend::new(), dir, config, &mut |e| events.push(e))
        .expect("pipeline run");
    (stats, events)
}

fn variant_lines(events: &[VariantEvent]) -> Vec<(String, VariantStatus)> {
    events
        .iter()
        .filter_map(|e| match e {
            VariantEvent::Variant { output, status } => Some((output.clone(), status.clone())),
            _ => None,
        })
        .collect()
}

/// Snapshot of directory state: filename -> mtime.
fn snapshot(dir: &Path) -> BTreeMap<String, SystemTime> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                e.metadata().unwrap().modified().unwrap(),
            )
        })
        .collect()
}

#[test]
fn scenario_two_sources_two_widths() {
    let tmp = TempDir::new().unwrap();
    write_jpeg(&tmp.path().join("infra1.jpg"), 1600, 900);
    write_png(&tmp.path().join("infra2.png"), 400, 300);

    let (stats, _) = run(tmp.path(), &config(&[480, 800]));
    assert_eq!(stats.created, 4);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.failed, 0);

    // Scaled variants preserve aspect ratio exactly
    assert_eq!(
        image::image_dimensions(tmp.path().join("infra1-480.webp")).unwrap(),
        (480, 270)
    );
    assert_eq!(
        image::image_dimensions(tmp.path().join("infra1-800.webp")).unwrap(),
        (800, 450)
    );

    // Smaller source is never upscaled: both variants keep 400x300
    assert_eq!(
        image::image_dimensions(tmp.path().join("infra2-480.webp")).unwrap(),
        (400, 300)
    );
    assert_eq!(
        image::image_dimensions(tmp.path().join("infra2-800.webp")).unwrap(),
        (400, 300)
    );
}

#[test]
fn second_run_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write_jpeg(&tmp.path().join("infra1.jpg"), 1600, 900);
    write_png(&tmp.path().join("infra2.png"), 400, 300);

    let cfg = config(&[480, 800]);
    run(tmp.path(), &cfg);
    let before = snapshot(tmp.path());

    let (stats, events) = run(tmp.path(), &cfg);
    assert_eq!(stats.created, 0);
    assert_eq!(stats.skipped, 4);

    // Four skip lines, no writes, mtimes untouched
    let lines = variant_lines(&events);
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|(_, s)| *s == VariantStatus::Skipped));
    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn force_overwrites_with_newer_mtime() {
    let tmp = TempDir::new().unwrap();
    write_jpeg(&tmp.path().join("infra1.jpg"), 800, 600);

    let mut cfg = config(&[480]);
    run(tmp.path(), &cfg);
    let first = snapshot(tmp.path())["infra1-480.webp"];

    // Filesystem mtime granularity can be a full second
    std::thread::sleep(std::time::Duration::from_millis(1100));

    cfg.force = true;
    let (stats, _) = run(tmp.path(), &cfg);
    assert_eq!(stats.created, 1);

    let second = snapshot(tmp.path())["infra1-480.webp"];
    assert!(second > first);
}

#[test]
fn dry_run_writes_nothing_and_matches_real_run() {
    let tmp = TempDir::new().unwrap();
    write_jpeg(&tmp.path().join("infra1.jpg"), 1600, 900);
    write_png(&tmp.path().join("infra2.png"), 400, 300);

    let before = snapshot(tmp.path());

    let mut dry = config(&[480, 800]);
    dry.dry_run = true;
    let (dry_stats, dry_events) = run(tmp.path(), &dry);

    // Bit-identical filesystem state
    assert_eq!(snapshot(tmp.path()), before);
    assert_eq!(dry_stats.created, 4);

    let would_create: Vec<String> = variant_lines(&dry_events)
        .into_iter()
        .filter(|(_, s)| *s == VariantStatus::WouldCreate)
        .map(|(name, _)| name)
        .collect();

    // A real run creates exactly the files the dry run announced
    let (_, real_events) = run(tmp.path(), &config(&[480, 800]));
    let created: Vec<String> = variant_lines(&real_events)
        .into_iter()
        .filter(|(_, s)| *s == VariantStatus::Created)
        .map(|(name, _)| name)
        .collect();

    assert_eq!(would_create, created);
    for name in &created {
        assert!(tmp.path().join(name).exists());
    }
}

#[test]
fn corrupt_source_fails_without_stopping_the_batch() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("infra1.jpg"), b"this is not a jpeg").unwrap();
    write_jpeg(&tmp.path().join("infra2.jpg"), 800, 600);

    let (stats, events) = run(tmp.path(), &config(&[480, 800]));

    // infra1's two widths fail, infra2's two succeed
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.created, 2);

    let lines = variant_lines(&events);
    assert!(matches!(lines[0], (ref n, VariantStatus::Failed(_)) if n == "infra1-480.webp"));
    assert!(matches!(lines[3], (ref n, VariantStatus::Created) if n == "infra2-800.webp"));
    assert!(tmp.path().join("infra2-480.webp").exists());
    assert!(!tmp.path().join("infra1-480.webp").exists());
}

#[test]
fn missing_directory_aborts_before_any_work() {
    let result = variants::generate(
        &RustBackend::new(),
        Path::new("/no/such/dir"),
        &config(&[480]),
        &mut |_| {},
    );
    assert!(matches!(
        result,
        Err(respimg::scan::ScanError::DirectoryNotFound(_))
    ));
}

#[test]
fn jpg_beats_png_for_the_same_base() {
    let tmp = TempDir::new().unwrap();
    write_jpeg(&tmp.path().join("infra1.jpg"), 640, 480);
    write_png(&tmp.path().join("infra1.png"), 200, 100);

    let (stats, _) = run(tmp.path(), &config(&[320]));
    assert_eq!(stats.created, 1);

    // Variant dimensions derive from the jpg source, proving the priority
    // tie-break picked it over the png
    assert_eq!(
        image::image_dimensions(tmp.path().join("infra1-320.webp")).unwrap(),
        (320, 240)
    );
}

#[test]
fn match_size_resizes_to_reference_dimensions() {
    use respimg::match_size;

    let tmp = TempDir::new().unwrap();
    write_jpeg(&tmp.path().join("s-1.jpg"), 640, 480);
    write_jpeg(&tmp.path().join("s-2.jpg"), 300, 500);

    let stats = match_size::match_reference(
        &RustBackend::new(),
        tmp.path(),
        "s-1.jpg",
        &["s-2.jpg".to_string()],
        Quality::new(90),
        false,
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(stats.created, 1);
    // Overwritten in place with the reference's exact dimensions. The file
    // keeps its name but now holds WebP data; decode by content.
    let decoded = image::ImageReader::open(tmp.path().join("s-2.jpg"))
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .decode()
        .unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 480));
}

#[test]
fn convert_tree_round_trip() {
    use respimg::convert;

    let tmp = TempDir::new().unwrap();
    let sub = tmp.path().join("products");
    std::fs::create_dir(&sub).unwrap();
    write_jpeg(&tmp.path().join("hero.jpg"), 320, 200);
    write_png(&sub.join("widget.png"), 100, 100);

    let stats = convert::convert_tree(
        &RustBackend::new(),
        tmp.path(),
        Quality::new(80),
        false,
        false,
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(stats.created, 2);
    assert_eq!(
        image::image_dimensions(tmp.path().join("hero.webp")).unwrap(),
        (320, 200)
    );
    assert_eq!(
        image::image_dimensions(sub.join("widget.webp")).unwrap(),
        (100, 100)
    );

    // Second pass skips both
    let stats = convert::convert_tree(
        &RustBackend::new(),
        tmp.path(),
        Quality::new(80),
        false,
        false,
        &mut |_| {},
    )
    .unwrap();
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.created, 0);
}
