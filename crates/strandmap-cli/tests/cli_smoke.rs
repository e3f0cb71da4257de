use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .expect("expected crates/<name> layout")
        .join("strandmap")
        .join("tests")
        .join("fixtures")
        .join(name)
}

const ONE_LIGHT: &str = "0\nSECTION\n2\nENTITIES\n\
0\nTEXT\n10\n0.0\n20\n0.0\n30\n0.0\n1\np2\n\
0\nCIRCLE\n10\n5.0\n20\n0.0\n30\n0.0\n\
0\nLINE\n10\n0.0\n20\n0.0\n30\n0.0\n11\n5.0\n21\n0.0\n31\n0.0\n\
0\nENDSEC\n0\nEOF\n";

#[test]
fn cli_prints_layout_json() {
    let path = fixture("two_strands.dxf");
    assert!(path.exists(), "fixture missing: {}", path.display());

    let exe = assert_cmd::cargo_bin!("strandmap-cli");
    let out = Command::new(exe)
        .args([
            "json",
            "--width",
            "101",
            "--height",
            "31",
            path.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");
    assert_eq!(v["maxX"], 100);
    assert_eq!(v["maxY"], 30);
    assert_eq!(v["customization"], "plain");
    assert_eq!(
        v["strands"][0]["coords"],
        serde_json::json!([[0, 30], [100, 30], [100, 20], [0, 20]])
    );
    assert_eq!(v["strands"][1]["coords"], serde_json::json!([[0, 0], [0, 10]]));
}

#[test]
fn cli_reads_options_from_config_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dxf = tmp.path().join("single.dxf");
    fs::write(&dxf, ONE_LIGHT).expect("write dxf");
    let config = tmp.path().join("options.json");
    fs::write(&config, r#"{"maxX": 9, "maxY": 4}"#).expect("write config");

    let exe = assert_cmd::cargo_bin!("strandmap-cli");
    let out = Command::new(exe)
        .args([
            "--config",
            config.to_string_lossy().as_ref(),
            dxf.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");
    assert_eq!(v["strands"][0]["id"], 1);
    assert_eq!(v["strands"][0]["coords"], serde_json::json!([[9, 0]]));
}

#[test]
fn cli_prints_summary() {
    let path = fixture("two_strands.dxf");
    let exe = assert_cmd::cargo_bin!("strandmap-cli");
    let out = Command::new(exe)
        .args([
            "summary",
            "--width",
            "101",
            "--height",
            "31",
            path.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("dst_width=101, dst_height=31"), "{stdout}");
    assert!(
        stdout.contains("Strand P1, led_count=4, x=(0-100), y=(20-30)"),
        "{stdout}"
    );
    assert!(
        stdout.contains("Strand P2, led_count=2, x=(0-0), y=(0-10)"),
        "{stdout}"
    );
}

#[test]
fn cli_strict_mode_rejects_degenerate_drawing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dxf = tmp.path().join("single.dxf");
    fs::write(&dxf, ONE_LIGHT).expect("write dxf");

    let exe = assert_cmd::cargo_bin!("strandmap-cli");
    Command::new(exe)
        .args(["--strict", dxf.to_string_lossy().as_ref()])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn cli_rejects_unknown_flag_with_usage() {
    let exe = assert_cmd::cargo_bin!("strandmap-cli");
    Command::new(exe)
        .args(["--bogus", "x.dxf"])
        .assert()
        .failure()
        .code(2);
}
