use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::{tempdir, TempDir};

/// Command isolated from any user configuration and ambient logging setup.
fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aspect-analyze").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    data
}

#[test]
fn offline_keyword_inference() {
    let dir = tempdir().unwrap();
    let json = json_stdout(cmd(&dir).args(["-o", "json", "analyze", "media", "banner_top.png", "--offline"]));

    assert_eq!(json["success"], true);
    assert_eq!(json["width"], 1920);
    assert_eq!(json["height"], 1080);
    assert_eq!(json["detection_method"], "filename_pattern");
    assert_eq!(json["classification"], "not_tall");
    assert_eq!(json["s3_source"]["bucket"], "media");
}

#[test]
fn explicit_dimensions_win() {
    let dir = tempdir().unwrap();
    let json = json_stdout(cmd(&dir).args([
        "analyze", "media", "mobile_1080x1920.png", "--offline", "--width", "300", "--height", "450",
        "--output", "json",
    ]));

    assert_eq!(json["detection_method"], "explicit");
    assert_eq!(json["classification"], "not_tall");
    assert_eq!(json["ratio_text"], "300:450");
}

#[test]
fn offline_default_dimensions() {
    let dir = tempdir().unwrap();
    let json = json_stdout(cmd(&dir).args(["-o", "json", "analyze", "media", "IMG_0042.jpg", "--offline"]));

    assert_eq!(json["detection_method"], "default");
    assert_eq!(json["width"], 800);
    assert_eq!(json["height"], 600);
}

#[test]
fn invalid_dimensions_still_exit_zero() {
    let dir = tempdir().unwrap();
    let json = json_stdout(cmd(&dir).args([
        "-o", "json", "analyze", "media", "a.png", "--offline", "--width", "-5", "--height", "10",
    ]));

    assert_eq!(json["success"], false);
    assert_eq!(json["classification"], "unknown");
    assert_eq!(json["debug_info"]["detected_width"], -5);
    assert_eq!(json["debug_info"]["detection_method"], "explicit");
}

#[test]
fn local_root_binary_analysis() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("media/uploads")).unwrap();
    fs::write(dir.path().join("media/uploads/photo.png"), png_header(400, 1200)).unwrap();

    cmd(&dir)
        .args(["analyze", "media", "uploads/photo.png", "--local-root", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dimensions: 400x1200"))
        .stdout(predicate::str::contains("Detection method: binary_analysis"))
        .stdout(predicate::str::contains("Result: tall image (more vertical than 2:3)"));
}

#[test]
fn local_root_undecodable_falls_back_to_size() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("media")).unwrap();
    fs::write(dir.path().join("media/blob.bin"), vec![0u8; 600_000]).unwrap();

    let json = json_stdout(cmd(&dir).args(["-o", "json", "analyze", "media", "blob.bin", "--local-root", "."]));
    assert_eq!(json["detection_method"], "filesize_estimation");
    assert_eq!(json["width"], 800);
}

#[test]
fn human_failure_output() {
    let dir = tempdir().unwrap();
    cmd(&dir)
        .args(["analyze", "media", "blank_0x100.png", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Analysis failed: Invalid dimensions detected: width=0, height=100",
        ));
}

#[test]
fn estimate_size_human() {
    let dir = tempdir().unwrap();
    cmd(&dir)
        .args(["estimate-size", "500 KB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("512000 bytes"))
        .stdout(predicate::str::contains("Estimated dimensions: 800x600"))
        .stdout(predicate::str::contains("Result: not tall (2:3 or wider)"));
}

#[test]
fn estimate_size_json() {
    let dir = tempdir().unwrap();
    let json = json_stdout(cmd(&dir).args(["-o", "json", "estimate-size", "1.06 MB"]));

    assert_eq!(json["bytes"], 1_111_490);
    assert_eq!(json["tier"], "medium");
    assert_eq!(json["width"], 1024);
    assert_eq!(json["height"], 768);
}

#[test]
fn inspect_local_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("square.png"), png_header(512, 512)).unwrap();

    let json = json_stdout(cmd(&dir).args(["-o", "json", "inspect", "square.png"]));
    assert_eq!(json["format"], "png");
    assert_eq!(json["width"], 512);
    assert_eq!(json["detail_classification"], "near square");
    assert_eq!(json["is_tall"], false);
}

#[test]
fn inspect_missing_file_fails() {
    let dir = tempdir().unwrap();
    cmd(&dir)
        .args(["inspect", "missing.png"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.png"));
}

#[test]
fn missing_config_file_is_a_config_error() {
    let dir = tempdir().unwrap();
    cmd(&dir)
        .args(["--config", "nope.toml", "estimate-size", "1 KB"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn config_file_sets_output_format() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".aspect-analyzer.toml"), "[output]\nformat = \"json\"\n").unwrap();

    let json = json_stdout(cmd(&dir).args(["analyze", "media", "avatar.png", "--offline"]));
    assert_eq!(json["width"], 500);
    assert_eq!(json["detail_classification"], "near square");
}

#[test]
fn half_a_key_pair_is_rejected() {
    let dir = tempdir().unwrap();
    cmd(&dir)
        .args(["analyze", "media", "a.png", "--aws-access-key", "AKIDEXAMPLE"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--aws-secret-key"));
}

#[test]
fn estimate_size_keeps_negative_counts() {
    let dir = tempdir().unwrap();
    let json = json_stdout(cmd(&dir).args(["-o", "json", "estimate-size", "-2048"]));

    assert_eq!(json["bytes"], -2048);
    assert_eq!(json["tier"], "small");
    assert_eq!(json["width"], 500);
}

#[test]
fn square_ratio_prints_decimal_ratio() {
    let dir = tempdir().unwrap();
    cmd(&dir)
        .args(["analyze", "media", "avatar.png", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aspect ratio: 1.0\n"));
}

#[test]
fn empty_local_object_uses_default() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("media")).unwrap();
    fs::write(dir.path().join("media/placeholder.jpg"), b"").unwrap();

    let json = json_stdout(cmd(&dir).args(["-o", "json", "analyze", "media", "placeholder.jpg", "--local-root", "."]));
    assert_eq!(json["detection_method"], "default");
    assert_eq!(json["width"], 800);
    assert_eq!(json["height"], 600);
}

#[test]
fn inspect_undecodable_file_reports_decode_code() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), b"plain text, not an image").unwrap();

    cmd(&dir)
        .args(["inspect", "notes.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("E5001"))
        .stderr(predicate::str::contains("notes.txt"));
}
