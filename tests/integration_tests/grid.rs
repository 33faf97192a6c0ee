// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use indoc::indoc;
use tempfile::TempDir;

use crate::{get_cmd_output, wgrid, SMALL_GRID_ARGS};

#[test]
fn test_grid_writes_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("grid.dat");

    let cmd = wgrid()
        .arg("grid")
        .args(SMALL_GRID_ARGS)
        .args(["--output", &output.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "grid failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Gridding rate"), "{stdout}");

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(bytes.len(), 128 * 128 * 16);
    assert!(bytes.iter().any(|&b| b != 0));
}

#[test]
fn test_dispatch_kinds_write_identical_grids() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let sequential = tmp_dir.path().join("sequential.dat");
    let parallel = tmp_dir.path().join("parallel.dat");

    wgrid()
        .arg("grid")
        .args(SMALL_GRID_ARGS)
        .args(["--cpu", "-o", &sequential.display().to_string()])
        .assert()
        .success();
    wgrid()
        .arg("grid")
        .args(SMALL_GRID_ARGS)
        .args(["--dispatch", "cpu-parallel", "--num-threads", "3", "-o"])
        .arg(&parallel)
        .assert()
        .success();

    assert_eq!(
        std::fs::read(&sequential).unwrap(),
        std::fs::read(&parallel).unwrap()
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("grid.dat");

    let cmd = wgrid()
        .args(["grid", "--dry-run", "-o", &output.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "dry run failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(stdout.contains("4096 x 4096 cells"), "{stdout}");
    assert!(!output.exists());
}

#[test]
fn test_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let arg_file = tmp_dir.path().join("args.toml");
    let mut f = std::fs::File::create(&arg_file).unwrap();
    f.write_all(
        indoc! {r#"
            [grid]
            grid_size = 64
            w_size = 5
            no_output = true

            [samples]
            num_samples = 10
        "#}
        .as_bytes(),
    )
    .unwrap();
    drop(f);

    let cmd = wgrid()
        .args(["grid", &arg_file.display().to_string(), "--dry-run"])
        .ok();
    assert!(cmd.is_ok(), "arg file run failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("64 x 64 cells"), "{stdout}");
    assert!(stdout.contains("5 w planes"), "{stdout}");
    assert!(stdout.contains("10 samples"), "{stdout}");
}

#[test]
fn test_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let toml_file = tmp_dir.path().join("saved.toml");

    wgrid()
        .args(["grid", "-g", "256", "--no-output", "--dry-run", "--save-toml"])
        .arg(&toml_file)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&toml_file).unwrap();
    assert!(contents.contains("grid_size = 256"), "{contents}");
    assert!(contents.contains("no_output = true"), "{contents}");

    // The saved file reproduces the run.
    let cmd = wgrid()
        .args(["grid", &toml_file.display().to_string(), "--dry-run"])
        .ok();
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("256 x 256 cells"), "{stdout}");
}

#[test]
fn test_samples_off_the_grid_fail() {
    let cmd = wgrid()
        .args([
            "grid",
            "--grid-size",
            "16",
            "--baseline",
            "50",
            "--num-samples",
            "50",
            "--no-output",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.contains("Gridding will fail"), "{stdout}");
    assert!(stderr.starts_with("Error:"), "{stderr}");
    assert!(stderr.contains("footprint"), "{stderr}");
}

#[test]
fn test_missing_samples_file_fails() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let samples_file = tmp_dir.path().join("nothing_here.dat");

    let cmd = wgrid()
        .args(["grid", "--no-output", "--samples-file"])
        .arg(&samples_file)
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("doesn't exist"), "{stderr}");
}

#[test]
fn test_single_w_plane_warns() {
    let cmd = wgrid()
        .args(["grid", "--dry-run", "--no-output", "--w-size", "1"])
        .ok();
    assert!(cmd.is_ok(), "dry run failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("map to w plane -1"), "{stdout}");

    let cmd = wgrid()
        .args(["grid", "--dry-run", "--no-output", "--w-size", "2"])
        .ok();
    let (stdout, _) = get_cmd_output(cmd);
    assert!(!stdout.contains("map to w plane"), "{stdout}");
}
