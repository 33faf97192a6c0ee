// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grid visibilities with W projection.

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{
    display_warnings, DispatchArgs, DispatchArgsError, InfoPrinter, SampleArgs, Warn,
    ARG_FILE_HELP,
};
use crate::{
    constants::{
        DEFAULT_BASELINE, DEFAULT_CELL_SIZE, DEFAULT_GRID_FILENAME, DEFAULT_GRID_SIZE,
        DEFAULT_NUM_CHANNELS, DEFAULT_NUM_SAMPLES, DEFAULT_W_SIZE, OVERSAMPLE,
    },
    gridding::ConvolutionTable,
    io::{can_write_to_file, FileWriteError},
    math::floor_to_i64,
    params::{GridParams, SampleSource},
    samples::channel_freqs,
    WgridError,
};

lazy_static::lazy_static! {
    static ref GRID_SIZE_HELP: String =
        format!("The number of cells along each side of the (square) grid. Default: {DEFAULT_GRID_SIZE}");

    static ref CELL_SIZE_HELP: String =
        format!("The size of one grid cell [wavelengths]. Default: {DEFAULT_CELL_SIZE}");

    static ref BASELINE_HELP: String =
        format!("The maximum baseline extent [metres]. Sample coordinates are spread over half of this either side of 0. Default: {DEFAULT_BASELINE}");

    static ref W_SIZE_HELP: String =
        format!("The number of w planes in the convolution function. Default: {DEFAULT_W_SIZE}");

    static ref NUM_CHANS_HELP: String =
        format!("The number of frequency channels. Default: {DEFAULT_NUM_CHANNELS}");

    static ref OUTPUT_HELP: String =
        format!("Path to the output grid file. Default: {DEFAULT_GRID_FILENAME}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct GridCliArgs {
    #[clap(short = 'g', long, help = GRID_SIZE_HELP.as_str(), help_heading = "GRID")]
    pub(super) grid_size: Option<usize>,

    #[clap(short = 'c', long, help = CELL_SIZE_HELP.as_str(), help_heading = "GRID")]
    pub(super) cell_size: Option<f64>,

    #[clap(short = 'b', long, help = BASELINE_HELP.as_str(), help_heading = "GRID")]
    pub(super) baseline: Option<f64>,

    #[clap(short = 'w', long, help = W_SIZE_HELP.as_str(), help_heading = "GRID")]
    pub(super) w_size: Option<usize>,

    #[clap(long, help = NUM_CHANS_HELP.as_str(), help_heading = "GRID")]
    pub(super) num_chans: Option<usize>,

    /// Read sample coordinates from this file rather than synthesising them.
    /// It must contain 4 little-endian f64s per sample, each in [0, 1).
    #[clap(short = 'i', long, parse(from_str), help_heading = "INPUT FILES")]
    pub(super) samples_file: Option<PathBuf>,

    #[clap(short = 'o', long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    /// Don't write the grid out. Useful for benchmarking.
    #[clap(long, conflicts_with("output"), help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) no_output: bool,
}

impl GridCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            grid_size: self.grid_size.or(other.grid_size),
            cell_size: self.cell_size.or(other.cell_size),
            baseline: self.baseline.or(other.baseline),
            w_size: self.w_size.or(other.w_size),
            num_chans: self.num_chans.or(other.num_chans),
            samples_file: self.samples_file.or(other.samples_file),
            output: self.output.or(other.output),
            no_output: self.no_output || other.no_output,
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct GridArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "grid")]
    #[serde(default)]
    pub(super) grid_args: GridCliArgs,

    #[clap(flatten)]
    #[serde(rename = "samples")]
    #[serde(default)]
    pub(super) sample_args: SampleArgs,

    #[clap(flatten)]
    #[serde(rename = "dispatch")]
    #[serde(default)]
    pub(super) dispatch_args: DispatchArgs,
}

impl GridArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<GridArgs, WgridError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Ensure all of the file args are accounted for by pattern
            // matching.
            let GridArgs {
                args_file: _,
                grid_args,
                sample_args,
                dispatch_args,
            } = unpack_arg_file!(arg_file);

            Ok(GridArgs {
                args_file: None,
                grid_args: cli_args.grid_args.merge(grid_args),
                sample_args: cli_args.sample_args.merge(sample_args),
                dispatch_args: cli_args.dispatch_args.merge(dispatch_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<GridParams, GridArgsError> {
        debug!("{:#?}", self);

        // Expose all the struct fields to ensure they're all used.
        let GridArgs {
            args_file: _,
            grid_args:
                GridCliArgs {
                    grid_size,
                    cell_size,
                    baseline,
                    w_size,
                    num_chans,
                    samples_file,
                    output,
                    no_output,
                },
            sample_args: SampleArgs { num_samples, seed },
            dispatch_args,
        } = self;

        let grid_size = grid_size.unwrap_or(DEFAULT_GRID_SIZE);
        if grid_size == 0 {
            return Err(GridArgsError::GridSizeZero);
        }
        let cell_size = cell_size.unwrap_or(DEFAULT_CELL_SIZE);
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridArgsError::CellSizeInvalid(cell_size));
        }
        let baseline = baseline.unwrap_or(DEFAULT_BASELINE);
        if !baseline.is_finite() || baseline <= 0.0 {
            return Err(GridArgsError::BaselineInvalid(baseline));
        }
        let w_size = w_size.unwrap_or(DEFAULT_W_SIZE);
        if w_size == 0 {
            return Err(GridArgsError::WSizeZero);
        }
        let num_chans = NonZeroUsize::new(num_chans.unwrap_or(DEFAULT_NUM_CHANNELS))
            .ok_or(GridArgsError::NumChansZero)?;
        let freqs = channel_freqs(num_chans);
        let support = ConvolutionTable::support_for(*freqs.first(), cell_size, baseline);

        let mut grid_printer = InfoPrinter::new("Grid".into());
        grid_printer.push_block(vec![
            format!("{grid_size} x {grid_size} cells of {cell_size} wavelengths").into(),
            format!("Maximum baseline: {baseline} m").into(),
        ]);
        grid_printer.push_block(vec![
            format!("{w_size} w planes, oversampled {OVERSAMPLE}x").into(),
            format!(
                "Kernel support: {support} pixels ({0} x {0} footprint)",
                2 * support + 1
            )
            .into(),
        ]);
        grid_printer.display();

        // Samples spread over half the baseline either side of the grid
        // centre. The lowest channel index has the highest frequency and so
        // the largest extent.
        let max_extent = (baseline / 2.0 * *freqs.first() / cell_size).ceil() as usize + support;
        if max_extent >= grid_size / 2 {
            vec![
                format!("Samples can be up to {max_extent} cells from the grid centre, but the grid only extends {} cells", grid_size / 2).into(),
                "Gridding will fail if any sample's footprint falls off the grid".into(),
            ]
            .warn();
        }
        let lowest_plane = lowest_w_plane(w_size);
        if lowest_plane < 0 {
            vec![
                format!("Samples with negative w map to w plane {lowest_plane}, but the lowest plane is 0").into(),
                "Gridding will fail if any sample has negative w; use at least 2 w planes".into(),
            ]
            .warn();
        }

        let num_samples = num_samples.unwrap_or(DEFAULT_NUM_SAMPLES);
        let sample_source = match samples_file {
            Some(file) => {
                if !file.exists() {
                    return Err(GridArgsError::SamplesFileDoesntExist(
                        file.into_boxed_path(),
                    ));
                }
                if let Some(seed) = seed {
                    format!("Reading samples from a file; ignoring the seed {seed}").warn();
                }
                SampleSource::File(file)
            }
            None => SampleSource::Generated {
                seed: seed.unwrap_or(1),
            },
        };

        let mut sample_printer = InfoPrinter::new("Samples".into());
        sample_printer.push_block(vec![
            format!("{num_samples} samples x {num_chans} channels").into(),
            format!("Source: {sample_source}").into(),
        ]);
        sample_printer.push_block(vec![
            format!("First channel: {:.6} inverse wavelengths", freqs.first()).into(),
            format!("Last channel:  {:.6} inverse wavelengths", freqs.last()).into(),
        ]);
        sample_printer.display();

        let output = if no_output {
            None
        } else {
            let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_GRID_FILENAME));
            can_write_to_file(&output)?;
            Some(output)
        };
        let dispatch = dispatch_args.parse()?;

        let mut output_printer = InfoPrinter::new("Output".into());
        output_printer.push_line(format!("Dispatch: {}", dispatch.description()).into());
        output_printer.push_line(
            match &output {
                Some(o) => format!("Grid file: {}", o.display()),
                None => "Not writing the grid".to_string(),
            }
            .into(),
        );
        output_printer.display();

        display_warnings();

        Ok(GridParams {
            grid_size,
            num_samples,
            num_chans,
            freqs,
            baseline,
            cell_size,
            w_size,
            sample_source,
            output,
            dispatch,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), WgridError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

/// The w plane of the most negative w a sample can have (`-baseline / 2`) at
/// the highest frequency. Negative planes are off the table.
pub(super) fn lowest_w_plane(w_size: usize) -> i64 {
    (w_size / 2) as i64 + floor_to_i64(-(w_size as f64) / 4.0)
}

#[derive(Error, Debug)]
pub(super) enum GridArgsError {
    #[error("The grid size cannot be 0!")]
    GridSizeZero,

    #[error("The number of channels cannot be 0!")]
    NumChansZero,

    #[error("The number of w planes cannot be 0!")]
    WSizeZero,

    #[error("The cell size must be positive, not {0}")]
    CellSizeInvalid(f64),

    #[error("The baseline must be positive, not {0}")]
    BaselineInvalid(f64),

    #[error("Sample file '{}' doesn't exist", .0.display())]
    SamplesFileDoesntExist(Box<Path>),

    #[error(transparent)]
    Dispatch(#[from] DispatchArgsError),

    #[error(transparent)]
    FileWrite(#[from] FileWriteError),
}
