extern crate image;
extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::Command;
use predicates::prelude::*;

fn mandel() -> Command {
    Command::cargo_bin("mandel").unwrap()
}

#[test]
fn renders_the_requested_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("set.png");
    mandel()
        .args(&["--size", "48x32", "--iterations", "100", "--repeats", "20"])
        .args(&["--leftlower=-2.0,-1.0", "--rightupper=1.0,1.0"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let img = image::open(&out).unwrap();
    assert_eq!(img.to_rgb8().dimensions(), (48, 32));
}

#[test]
fn names_output_after_the_frame() {
    let dir = tempfile::tempdir().unwrap();
    mandel()
        .current_dir(dir.path())
        .args(&["--size", "16x16", "--iterations", "50", "--frame", "7"])
        .args(&["--center=-0.5,0.0", "--zoom", "5"])
        .assert()
        .success();
    assert!(dir.path().join("0007.png").exists());
}

#[test]
fn writes_the_escape_grid_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let grid = dir.path().join("grid.pgm");
    mandel()
        .current_dir(dir.path())
        .args(&["--size", "20x10", "--iterations", "50", "--threads", "1"])
        .args(&["--leftlower=-2.0,-1.0", "--rightupper=1.0,1.0"])
        .arg("--grid")
        .arg(&grid)
        .assert()
        .success();
    assert!(dir.path().join("0001.png").exists());
    let bytes = std::fs::read(&grid).unwrap();
    assert!(bytes.starts_with(b"P5"));
}

#[test]
fn rejects_unparseable_sizes() {
    mandel()
        .args(&["--size", "big"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn rejects_inverted_bounds() {
    let dir = tempfile::tempdir().unwrap();
    mandel()
        .current_dir(dir.path())
        .args(&["--size", "8x8", "--iterations", "10"])
        .args(&["--leftlower=1.0,1.0", "--rightupper=-1.0,-1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}

#[test]
fn rejects_empty_images() {
    let dir = tempfile::tempdir().unwrap();
    mandel()
        .current_dir(dir.path())
        .args(&["--size", "0x8", "--iterations", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("resolution"));
}
