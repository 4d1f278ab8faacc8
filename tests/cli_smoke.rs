use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_testcard"))
}

#[test]
fn cli_frame_writes_png_from_preset() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("smpte.png");

    let status = Command::new(exe())
        .args(["frame", "--scene", "smpte", "--frame", "0"])
        .args(["--preview-scale", "0.05", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap();
    assert_eq!((img.width(), img.height()), (192, 108));
}

#[test]
fn cli_render_writes_png_sequence_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let scene_path = dir.path().join("scene.json");
    let out_dir = dir.path().join("frames");

    let spec = serde_json::json!({
        "resolution": "720p",
        "scale": 0.05,
        "fps": 5,
        "scene": { "kind": "countdown", "start_secs": 1, "strategy": "replicate" }
    });
    std::fs::write(&scene_path, serde_json::to_vec_pretty(&spec).unwrap()).unwrap();

    let status = Command::new(exe())
        .arg("render")
        .arg("--in")
        .arg(&scene_path)
        .arg("--out")
        .arg(&out_dir)
        .status()
        .unwrap();

    assert!(status.success());
    let count = std::fs::read_dir(&out_dir).unwrap().count();
    assert_eq!(count, 10);
    assert!(out_dir.join("frame_000009.png").exists());
}

#[test]
fn cli_rejects_unknown_scene() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(exe())
        .args(["frame", "--scene", "no_such_card", "--frame", "0", "--out"])
        .arg(dir.path().join("x.png"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown scene"));
}

#[test]
fn cli_lists_scenes() {
    let output = Command::new(exe()).arg("scenes").output().unwrap();
    assert!(output.status.success());
    let listed = String::from_utf8_lossy(&output.stdout);
    assert!(listed.lines().any(|l| l == "ring_countdown"));
}

#[test]
fn cli_render_keeps_existing_mp4_with_no_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("clip.mp4");
    std::fs::write(&out_path, b"existing").unwrap();

    let output = Command::new(exe())
        .args(["render", "--scene", "countdown_fast", "--preview-scale", "0.05"])
        .args(["--background", "navy", "--no-overwrite", "--out"])
        .arg(&out_path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(std::fs::read(&out_path).unwrap(), b"existing");
}

#[test]
fn cli_rejects_bad_background_colour() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(exe())
        .args(["render", "--scene", "smpte", "--background", "#12", "--out"])
        .arg(dir.path().join("frames"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}
