// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod grid;
mod no_stderr;
mod random_samples;

use std::{process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn wgrid() -> Command {
    Command::cargo_bin("wgrid").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Arguments for a grid that is small enough to be made quickly, but that
/// still holds every sample.
const SMALL_GRID_ARGS: [&str; 11] = [
    "--grid-size",
    "128",
    "--baseline",
    "50",
    "--w-size",
    "9",
    "--num-samples",
    "200",
    "--num-chans",
    "2",
    "--no-progress-bars",
];
