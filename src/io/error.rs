// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadSamplesError {
    #[error("Couldn't open sample file '{}': {err}", file.display())]
    Open { file: PathBuf, err: std::io::Error },

    #[error("Expected {expected} samples ({} values) but the sample data ended after {got} complete samples", expected * crate::constants::DRAWS_PER_SAMPLE)]
    Truncated { expected: usize, got: usize },

    #[error("Sample value {index} is {value}, which is not finite")]
    NotFinite { index: usize, value: f64 },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ReadGridError {
    #[error("Expected {expected} grid cells but the grid data ended after {got}")]
    Truncated { expected: usize, got: usize },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum WriteGridError {
    #[error("Couldn't create '{}': {err}", file.display())]
    Create { file: PathBuf, err: std::io::Error },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum FileWriteError {
    #[error("Cannot write to the specified file '{file}'")]
    FileNotWritable { file: String },

    #[error("Cannot create directory '{}' for output files", .0.display())]
    NewDirectory(PathBuf),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
