// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Write a file of synthetic sample coordinates.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use super::common::{InfoPrinter, SampleArgs};
use crate::{
    constants::{DEFAULT_NUM_SAMPLES, DEFAULT_SAMPLES_FILENAME, DRAWS_PER_SAMPLE},
    io::can_write_to_file,
    params::RandomSamplesParams,
    WgridError,
};

lazy_static::lazy_static! {
    static ref OUTPUT_HELP: String =
        format!("Path to the output sample file. Default: {DEFAULT_SAMPLES_FILENAME}");
}

#[derive(Parser, Debug, Clone, Default)]
pub(super) struct RandomSamplesArgs {
    #[clap(flatten)]
    pub(super) sample_args: SampleArgs,

    #[clap(short = 'o', long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl RandomSamplesArgs {
    fn parse(self) -> Result<RandomSamplesParams, WgridError> {
        let RandomSamplesArgs {
            sample_args: SampleArgs { num_samples, seed },
            output,
        } = self;

        let num_samples = num_samples.unwrap_or(DEFAULT_NUM_SAMPLES);
        let seed = seed.unwrap_or(1);
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLES_FILENAME));
        can_write_to_file(&output)?;

        let mut printer = InfoPrinter::new("Random samples".into());
        printer.push_block(vec![
            format!("{num_samples} samples ({DRAWS_PER_SAMPLE} draws each), seed {seed}").into(),
            format!("Output: {}", output.display()).into(),
        ]);
        printer.display();

        Ok(RandomSamplesParams {
            num_samples,
            seed,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), WgridError> {
        let params = self.parse()?;
        super::common::display_warnings();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}
