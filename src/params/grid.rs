// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grid visibilities and write the grid out.

use std::{num::NonZeroUsize, path::PathBuf, time::Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info};
use ndarray::prelude::*;
use thiserror::Error;
use vec1::Vec1;

use super::SampleSource;
use crate::{
    c64,
    dispatch::GridDispatch,
    gridding::{
        check_samples, map_offsets, new_grid, ConvolutionError, ConvolutionTable, GridError,
        MapError, OffsetMapper,
    },
    io::{write_grid_to_file, ReadSamplesError, WriteGridError},
    samples::Visibilities,
    PROGRESS_BARS,
};

/// The number of samples handed to the dispatcher at a time. This only sets
/// how often the progress bar is updated.
const SAMPLES_PER_BATCH: usize = 1 << 16;

/// Parameters needed to grid visibilities.
pub(crate) struct GridParams {
    /// The number of cells along each side of the grid.
    pub(crate) grid_size: usize,

    /// The number of physical samples.
    pub(crate) num_samples: usize,

    pub(crate) num_chans: NonZeroUsize,

    /// The frequency of each channel \[inverse wavelengths\]. There is one
    /// per channel.
    pub(crate) freqs: Vec1<f64>,

    /// The maximum baseline extent \[metres\].
    pub(crate) baseline: f64,

    /// \[wavelengths\]
    pub(crate) cell_size: f64,

    /// The number of w planes.
    pub(crate) w_size: usize,

    pub(crate) sample_source: SampleSource,

    /// The grid file to be written. If this is `None`, the grid is discarded.
    pub(crate) output: Option<PathBuf>,

    pub(crate) dispatch: Box<dyn GridDispatch>,
}

impl GridParams {
    /// Build the convolution function, map the samples and grid them. The grid
    /// is returned after being written out.
    pub(crate) fn run(&self) -> Result<Array2<c64>, GridParamsError> {
        let GridParams {
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
        } = self;

        info!("Initialising");
        let init_start = Instant::now();
        let draws = sample_source.draws(*num_samples)?;
        let vis = Visibilities::from_draws(&draws, *baseline, *num_chans);
        drop(draws);

        let table = ConvolutionTable::new(*freqs.first(), *cell_size, *baseline, *w_size)?;
        info!(
            "Convolution function: support {} pixels, {} w planes, {:.1} MiB",
            table.support(),
            table.w_size(),
            (table.len() * std::mem::size_of::<c64>()) as f64 / 1024.0 / 1024.0
        );
        let mapper = OffsetMapper::new(&table, *cell_size, *grid_size);
        let samples = map_offsets(&vis, freqs, &mapper)?;
        drop(vis);
        // Reject bad samples before any work is done on the grid.
        check_samples(&samples, &table, *grid_size)?;
        info!("Initialisation took {:.3?}", init_start.elapsed());

        let progress_bar = ProgressBar::with_draw_target(
            Some(samples.len() as _),
            if PROGRESS_BARS.load() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(
            ProgressStyle::default_bar()
                .template("{msg:17}: [{wide_bar:.blue}] {human_pos}/{human_len} samples ({elapsed_precise}<{eta_precise})")
                .unwrap()
                .progress_chars("=> "),
        )
        .with_position(0)
        .with_message("Gridding");

        info!("Gridding with {}", dispatch.description());
        let mut grid = new_grid(*grid_size);
        let grid_start = Instant::now();
        for batch in samples.chunks(SAMPLES_PER_BATCH) {
            dispatch.accumulate(&table, batch, grid.view_mut())?;
            progress_bar.inc(batch.len() as _);
        }
        let elapsed = grid_start.elapsed();
        progress_bar.abandon_with_message("Finished gridding");

        let grid_points = samples.len() * table.footprint_len();
        info!("Gridding took {elapsed:.3?}");
        info!(
            "Gridding rate: {:.3} million grid points per second",
            grid_points as f64 / elapsed.as_secs_f64().max(f64::MIN_POSITIVE) / 1e6
        );
        debug!("Sum of grid cells: {}", grid.sum());

        if let Some(output) = output {
            info!("Writing grid to {}", output.display());
            write_grid_to_file(output, grid.view())?;
        }

        Ok(grid)
    }
}

#[derive(Error, Debug)]
pub(crate) enum GridParamsError {
    #[error(transparent)]
    ReadSamples(#[from] ReadSamplesError),

    #[error(transparent)]
    Convolution(#[from] ConvolutionError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    WriteGrid(#[from] WriteGridError),
}
