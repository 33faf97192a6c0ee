// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{wgrid, SMALL_GRID_ARGS};

#[test]
fn test_random_samples_file_size() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("randnum.dat");

    wgrid()
        .args(["random-samples", "-n", "25", "-o"])
        .arg(&output)
        .assert()
        .success();
    assert_eq!(std::fs::metadata(&output).unwrap().len(), 25 * 4 * 8);
}

#[test]
fn test_sample_file_matches_generator() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let samples = tmp_dir.path().join("randnum.dat");
    let from_file = tmp_dir.path().join("from_file.dat");
    let generated = tmp_dir.path().join("generated.dat");

    wgrid()
        .args(["random-samples", "--num-samples", "200", "--seed", "3", "-o"])
        .arg(&samples)
        .assert()
        .success();
    wgrid()
        .arg("grid")
        .args(SMALL_GRID_ARGS)
        .arg("--samples-file")
        .arg(&samples)
        .arg("-o")
        .arg(&from_file)
        .assert()
        .success();
    wgrid()
        .arg("grid")
        .args(SMALL_GRID_ARGS)
        .args(["--seed", "3", "-o"])
        .arg(&generated)
        .assert()
        .success();

    assert_eq!(
        std::fs::read(&from_file).unwrap(),
        std::fs::read(&generated).unwrap()
    );
}

#[test]
fn test_truncated_sample_file_fails() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let samples = tmp_dir.path().join("randnum.dat");

    wgrid()
        .args(["random-samples", "-n", "10", "-o"])
        .arg(&samples)
        .assert()
        .success();
    wgrid()
        .arg("grid")
        .args(SMALL_GRID_ARGS)
        .args(["--no-output", "--samples-file"])
        .arg(&samples)
        .assert()
        .failure();
}
