// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{get_cmd_output, wgrid, SMALL_GRID_ARGS};

#[test]
fn test_grid_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("grid.dat");

    let cmd = wgrid()
        .arg("grid")
        .args(SMALL_GRID_ARGS)
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "grid failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_random_samples_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("randnum.dat");

    let cmd = wgrid()
        .args(["random-samples", "-n", "10", "-o"])
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "random-samples failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
