// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for `wgrid` subcommands.
//!
//! The code here mirrors the code within the `cli` module; `cli` is unparsed,
//! user-facing code, whereas parameters have been validated and are ready to
//! be used directly.

mod grid;
mod random_samples;

pub(crate) use grid::{GridParams, GridParamsError};
pub(crate) use random_samples::RandomSamplesParams;

use std::path::PathBuf;

use crate::{
    io::{read_sample_draws_from_file, ReadSamplesError},
    samples::{Lcg, SampleDraws},
};

/// Where the random draws behind each physical sample come from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SampleSource {
    /// A file of little-endian `f64`s.
    File(PathBuf),

    /// The built-in generator, with this seed.
    Generated { seed: u32 },
}

impl SampleSource {
    pub(crate) fn draws(&self, num_samples: usize) -> Result<Vec<SampleDraws>, ReadSamplesError> {
        match self {
            SampleSource::File(file) => read_sample_draws_from_file(file, num_samples),
            SampleSource::Generated { seed } => Ok(Lcg::new(*seed).sample_draws(num_samples)),
        }
    }
}

impl std::fmt::Display for SampleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleSource::File(file) => write!(f, "{}", file.display()),
            SampleSource::Generated { seed } => write!(f, "generated (seed {seed})"),
        }
    }
}
