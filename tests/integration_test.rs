use image::{ImageBuffer, Rgba, RgbaImage};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const OUTPUT_FILES: [&str; 4] = [
    "icon-192.png",
    "icon-512.png",
    "apple-touch-icon.png",
    "favicon.ico",
];

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_web-icon-gen"))
}

fn run(args: &[&Path], cwd: &Path) -> Output {
    Command::new(binary_path())
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run web-icon-gen")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("web-icon-gen failed with {}", output.status);
    }
}

/// Gradient with a transparent border, saved as PNG
fn create_source_image(path: &Path, width: u32, height: u32) {
    let image: RgbaImage = ImageBuffer::from_fn(width, height, |x, y| {
        let alpha = if x == 0 || y == 0 { 0 } else { 255 };
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, alpha])
    });
    image.save(path).expect("Failed to save source image");
}

#[test]
fn writes_every_asset_at_its_size() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source.png");
    create_source_image(&source, 100, 100);
    let out_dir = temp_dir.path().join("public");

    let output = run(&[&source, Path::new("-o"), &out_dir], temp_dir.path());
    assert_success(&output);

    for (name, size) in [
        ("icon-192.png", 192),
        ("icon-512.png", 512),
        ("apple-touch-icon.png", 180),
    ] {
        let icon = image::open(out_dir.join(name)).expect(name);
        assert_eq!((icon.width(), icon.height()), (size, size), "{name}");
    }

    let favicon = ico::IconDir::read(File::open(out_dir.join("favicon.ico")).unwrap())
        .expect("favicon.ico should be a valid icon container");
    let sizes: Vec<(u32, u32)> = favicon
        .entries()
        .iter()
        .map(|entry| (entry.width(), entry.height()))
        .collect();
    assert_eq!(sizes, vec![(16, 16), (32, 32), (48, 48)]);
    for entry in favicon.entries() {
        let frame = entry.decode().expect("favicon frame should decode");
        assert_eq!(frame.width(), entry.width());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in OUTPUT_FILES {
        assert!(stdout.contains(name), "summary should mention {name}");
    }
}

#[test]
fn wide_source_is_letterboxed() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("banner.png");
    RgbaImage::from_pixel(1000, 500, Rgba([255, 0, 0, 255]))
        .save(&source)
        .unwrap();
    let out_dir = temp_dir.path().join("public");

    assert_success(&run(&[&source, Path::new("--output"), &out_dir], temp_dir.path()));

    let icon = image::open(out_dir.join("icon-192.png")).unwrap().to_rgba8();
    assert_eq!(icon.dimensions(), (192, 192));
    for (x, y, pixel) in icon.enumerate_pixels() {
        if (48..144).contains(&y) {
            assert_eq!(pixel.0, [255, 0, 0, 255], "content at ({x}, {y})");
        } else {
            assert_eq!(pixel.0[3], 0, "padding at ({x}, {y})");
        }
    }
}

#[test]
fn rerun_produces_identical_files() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source.png");
    create_source_image(&source, 300, 200);
    let out_dir = temp_dir.path().join("public");

    assert_success(&run(&[&source, Path::new("-o"), &out_dir], temp_dir.path()));
    let first: Vec<Vec<u8>> = OUTPUT_FILES
        .iter()
        .map(|name| std::fs::read(out_dir.join(name)).unwrap())
        .collect();

    assert_success(&run(&[&source, Path::new("-o"), &out_dir], temp_dir.path()));
    for (name, before) in OUTPUT_FILES.iter().zip(first) {
        let after = std::fs::read(out_dir.join(name)).unwrap();
        assert!(before == after, "{name} changed between runs");
    }
}

#[test]
fn defaults_to_the_web_public_directory() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source.jpg");
    image::RgbImage::from_pixel(64, 64, image::Rgb([10, 200, 30]))
        .save(&source)
        .unwrap();

    assert_success(&run(&[&source], temp_dir.path()));

    let public = temp_dir.path().join("apps").join("web").join("public");
    for name in OUTPUT_FILES {
        assert!(public.join(name).is_file(), "{name} missing");
    }
    let icon = image::open(public.join("apple-touch-icon.png"))
        .unwrap()
        .to_rgba8();
    assert!(icon.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn json_summary_lists_all_files() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source.png");
    create_source_image(&source, 100, 100);
    let out_dir = temp_dir.path().join("public");

    let output = run(
        &[&source, Path::new("-o"), &out_dir, Path::new("--json")],
        temp_dir.path(),
    );
    assert_success(&output);

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON only");
    let files = report["files"].as_array().unwrap();
    let names: Vec<&str> = files.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(names, OUTPUT_FILES);

    for file in files {
        let on_disk = std::fs::metadata(out_dir.join(file["name"].as_str().unwrap()))
            .unwrap()
            .len();
        assert_eq!(file["bytes"].as_u64(), Some(on_disk));
    }
}

#[test]
fn missing_argument_prints_usage() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&[], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout was: {stdout}");
    assert!(!temp_dir.path().join("apps").exists());
}

#[test]
fn nonexistent_source_names_the_path() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("no-such-icon.png");

    let output = run(&[&missing], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no-such-icon.png"), "stderr was: {stderr}");
    assert!(!temp_dir.path().join("apps").exists());
}
