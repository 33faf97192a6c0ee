// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use log::info;

use crate::{
    io::{write_sample_draws_to_file, WriteGridError},
    samples::Lcg,
};

/// Parameters needed to write a file of random sample draws.
pub(crate) struct RandomSamplesParams {
    pub(crate) num_samples: usize,
    pub(crate) seed: u32,
    pub(crate) output: PathBuf,
}

impl RandomSamplesParams {
    pub(crate) fn run(&self) -> Result<(), WriteGridError> {
        let draws = Lcg::new(self.seed).sample_draws(self.num_samples);
        info!(
            "Writing {} samples to {}",
            self.num_samples,
            self.output.display()
        );
        write_sample_draws_to_file(&self.output, &draws)
    }
}
