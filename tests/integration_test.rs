use funnel_icons::icon_gen::{BACKGROUND, FOREGROUND};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const EXPECTED_FILES: [&str; 4] = ["icon-16.png", "icon-32.png", "icon-48.png", "icon-64.png"];

/// Runs `funnel-icons` with no arguments inside an empty directory and asserts
/// that exactly the four icons appear there with the right size and colors.
#[test]
fn test_default_run_writes_icons_to_cwd() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    let output = Command::new(env!("CARGO_BIN_EXE_funnel-icons"))
        .current_dir(temp_path)
        .output()
        .expect("Failed to run funnel-icons");
    assert_success(&output, "funnel-icons");

    assert_eq!(list_dir(temp_path), EXPECTED_FILES);

    for (size, name) in [16, 32, 48, 64].into_iter().zip(EXPECTED_FILES) {
        let icon = image::open(temp_path.join(name))
            .expect("Generated icon should be a valid PNG")
            .to_rgba8();

        assert_eq!(icon.dimensions(), (size, size), "{name} has wrong size");
        assert_eq!(*icon.get_pixel(0, 0), BACKGROUND, "{name} corner");
        assert_eq!(
            *icon.get_pixel(size - 1, size - 1),
            BACKGROUND,
            "{name} opposite corner"
        );
        assert_eq!(*icon.get_pixel(size / 2, size / 2), FOREGROUND, "{name} center");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in EXPECTED_FILES {
        assert!(stdout.contains(name), "stdout should confirm {name}");
    }
    assert!(stdout.contains("All icons generated successfully!"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    run_with_output(&output_dir, &[]);
    let first: Vec<Vec<u8>> = EXPECTED_FILES
        .iter()
        .map(|name| std::fs::read(output_dir.join(name)).unwrap())
        .collect();

    run_with_output(&output_dir, &[]);
    let second: Vec<Vec<u8>> = EXPECTED_FILES
        .iter()
        .map(|name| std::fs::read(output_dir.join(name)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_manifest_flag_writes_icons_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    run_with_output(&output_dir, &["--manifest"]);

    let content = std::fs::read_to_string(output_dir.join("icons.json"))
        .expect("icons.json should exist when --manifest is passed");
    let parsed: serde_json::Value =
        serde_json::from_str(&content).expect("icons.json should contain valid JSON");

    for (size, name) in ["16", "32", "48", "64"].into_iter().zip(EXPECTED_FILES) {
        assert_eq!(parsed["icons"][size], name);
    }
    assert_eq!(parsed["icons"].as_object().unwrap().len(), 4);
}

#[test]
fn test_verify_icons_accepts_generated_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    run_with_output(&output_dir, &[]);

    let output = Command::new(env!("CARGO_BIN_EXE_verify_icons"))
        .arg(&output_dir)
        .output()
        .expect("Failed to run verify_icons");
    assert_success(&output, "verify_icons");
}

#[test]
fn test_verify_icons_rejects_blank_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    run_with_output(&output_dir, &[]);

    // Replace one icon with a plain background square
    image::RgbaImage::from_pixel(32, 32, BACKGROUND)
        .save(output_dir.join("icon-32.png"))
        .expect("Failed to save blank icon");

    let output = Command::new(env!("CARGO_BIN_EXE_verify_icons"))
        .arg(&output_dir)
        .output()
        .expect("Failed to run verify_icons");
    assert!(!output.status.success(), "verify_icons should fail on a blank icon");
}

fn run_with_output(output_dir: &Path, extra_args: &[&str]) {
    let output = Command::new(env!("CARGO_BIN_EXE_funnel-icons"))
        .arg("-o")
        .arg(output_dir)
        .args(extra_args)
        .output()
        .expect("Failed to run funnel-icons");
    assert_success(&output, "funnel-icons");
}

fn assert_success(output: &Output, name: &str) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("{name} command failed");
    }
}

fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read output directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
