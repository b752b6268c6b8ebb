#![cfg(feature = "cli")]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use image::{GrayImage, Luma};
use predicates::prelude::*;

fn ink_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.put_pixel(x, y, Luma([0]));
        }
    }
}

/// Two reference glyphs (`ო` square, `ლ` bar) and a phrase "ო ლო".
fn write_fixture(root: &Path) {
    let refs = root.join("alphabet");
    fs::create_dir_all(&refs).expect("mkdir");

    let mut square = GrayImage::from_pixel(20, 20, Luma([255]));
    ink_rect(&mut square, 3, 3, 14, 14);
    square.save(refs.join("ო.bmp")).expect("save");

    let mut bar = GrayImage::from_pixel(20, 20, Luma([255]));
    ink_rect(&mut bar, 8, 2, 11, 17);
    bar.save(refs.join("ლ.bmp")).expect("save");

    let mut phrase = GrayImage::from_pixel(120, 30, Luma([255]));
    ink_rect(&mut phrase, 5, 5, 16, 16);
    ink_rect(&mut phrase, 50, 4, 53, 19);
    ink_rect(&mut phrase, 62, 5, 73, 16);
    phrase.save(root.join("phrase.bmp")).expect("save");
}

fn mkhedruli() -> Command {
    Command::cargo_bin("mkhedruli").expect("binary")
}

#[test]
fn init_config_writes_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cfg.json");

    mkhedruli()
        .args(["init-config", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote default config"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(json["params"]["threshold"], 128);
    assert_eq!(json["params"]["space_threshold"], 20);
    assert_eq!(json["output_dir"], "pictures_results");
}

#[test]
fn recognize_prints_prediction_and_writes_results() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixture(dir.path());
    let out = dir.path().join("results");

    mkhedruli()
        .current_dir(dir.path())
        .args([
            "recognize",
            "--alphabet",
            "ოლ",
            "--reference-dir",
            "alphabet",
            "--phrase",
            "phrase.bmp",
            "--truth",
            "ო ლო",
            "--output-dir",
        ])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("prediction: ო ლო"))
        .stdout(predicate::str::contains("accuracy: 100.00%"));

    for name in [
        "hypotheses.txt",
        "best_prediction.txt",
        "phrase_segmented.bmp",
        "report.json",
    ] {
        assert!(out.join(name).is_file(), "{name}");
    }
    assert_eq!(
        fs::read_to_string(out.join("best_prediction.txt")).expect("read"),
        "ო ლო"
    );
    let hyps = fs::read_to_string(out.join("hypotheses.txt")).expect("read");
    assert_eq!(hyps.lines().count(), 3);
}

#[test]
fn config_file_is_overridden_by_flags() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixture(dir.path());

    let cfg = serde_json::json!({
        "alphabet": "ოლ",
        "reference_dir": "alphabet",
        "phrase_path": "phrase.bmp",
        "ground_truth": null,
        "output_dir": "out",
        "params": { "space_threshold": 20 }
    });
    fs::write(dir.path().join("cfg.json"), cfg.to_string()).expect("write");

    // A huge gap threshold merges everything into one word.
    mkhedruli()
        .current_dir(dir.path())
        .args(["recognize", "--config", "cfg.json", "--space-threshold", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prediction: ოლო"))
        .stdout(predicate::str::contains("accuracy").not());
}

#[test]
fn missing_reference_glyph_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixture(dir.path());

    mkhedruli()
        .current_dir(dir.path())
        .args([
            "recognize",
            "--alphabet",
            "ოლა",
            "--reference-dir",
            "alphabet",
            "--phrase",
            "phrase.bmp",
            "--no-truth",
            "--output-dir",
            "out",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no reference glyph for symbol 'ა'"));
}
