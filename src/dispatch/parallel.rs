// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parallel gridding over disjoint bands of grid rows.
//!
//! Footprints of different samples can overlap, so samples can't simply be
//! gridded concurrently. Instead, each band of rows is owned by exactly one
//! thread, and every sample touching a band is applied to it in sample order.
//! Each cell therefore sees the same sequence of additions as in
//! [`CpuSequential`](super::CpuSequential), and the results are bit-identical.

use std::num::NonZeroUsize;

use log::trace;
use ndarray::{parallel::prelude::*, prelude::*};
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{get_cpu_info, DispatchError, GridDispatch};
use crate::{
    c64,
    gridding::{
        accumulate_row, check_grid_shape, check_samples, ConvolutionTable, GridError, Sample,
    },
};

/// The number of bands created per thread. More bands than threads keeps
/// threads busy when samples are clumped.
const BANDS_PER_THREAD: usize = 4;

pub struct CpuParallel {
    /// If this is `None`, rayon's global thread pool is used.
    pool: Option<ThreadPool>,

    /// The number of grid rows per band. If this is `None`, it is derived from
    /// the number of threads.
    band_height: Option<NonZeroUsize>,
}

impl Default for CpuParallel {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuParallel {
    /// Use rayon's global thread pool.
    pub fn new() -> CpuParallel {
        CpuParallel {
            pool: None,
            band_height: None,
        }
    }

    /// Use a dedicated pool of `num_threads` threads.
    pub fn with_threads(num_threads: NonZeroUsize) -> Result<CpuParallel, DispatchError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads.get())
            .thread_name(|i| format!("grid-{i}"))
            .build()?;
        Ok(CpuParallel {
            pool: Some(pool),
            band_height: None,
        })
    }

    /// Use a fixed number of grid rows per band.
    pub fn band_height(self, band_height: NonZeroUsize) -> CpuParallel {
        CpuParallel {
            band_height: Some(band_height),
            ..self
        }
    }

    fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn get_band_height(&self, grid_size: usize) -> usize {
        match self.band_height {
            Some(h) => h.get(),
            None => {
                let num_bands = self.num_threads() * BANDS_PER_THREAD;
                grid_size.div_ceil(num_bands).max(1)
            }
        }
    }

    fn accumulate_bands(
        &self,
        table: &ConvolutionTable,
        samples: &[Sample],
        mut grid: ArrayViewMut2<c64>,
        band_height: usize,
    ) {
        let support = table.support() as i64;
        let s_size = table.s_size();
        let num_bands = grid.len_of(Axis(0)).div_ceil(band_height);

        // Bin the sample indices by the bands their footprints touch. Indices
        // are pushed in ascending order, which preserves the canonical
        // accumulation order within every band.
        let mut bins: Vec<Vec<usize>> = vec![vec![]; num_bands];
        for (i, sample) in samples.iter().enumerate() {
            let first_row = (sample.iv - support) as usize;
            let last_row = first_row + s_size - 1;
            for bin in &mut bins[first_row / band_height..=last_row / band_height] {
                bin.push(i);
            }
        }
        trace!(
            "Gridding {} samples over {num_bands} bands of {band_height} rows",
            samples.len()
        );

        grid.axis_chunks_iter_mut(Axis(0), band_height)
            .into_par_iter()
            .zip(bins.par_iter())
            .enumerate()
            .for_each(|(i_band, (mut band, bin))| {
                let band_start = i_band * band_height;
                let band_end = band_start + band.len_of(Axis(0));

                for &i in bin {
                    let sample = &samples[i];
                    let first_row = (sample.iv - support) as usize;
                    let u_start = (sample.iu - support) as usize;
                    let footprint =
                        &table.as_slice()[sample.c_offset as usize..][..s_size * s_size];

                    // Only the footprint rows that fall in this band.
                    let rows = first_row.max(band_start)..(first_row + s_size).min(band_end);
                    for row in rows {
                        let dj = row - first_row;
                        accumulate_row(
                            band.slice_mut(s![row - band_start, u_start..u_start + s_size]),
                            &footprint[dj * s_size..(dj + 1) * s_size],
                            sample.data,
                        );
                    }
                }
            });
    }
}

impl GridDispatch for CpuParallel {
    fn accumulate(
        &self,
        table: &ConvolutionTable,
        samples: &[Sample],
        grid: ArrayViewMut2<c64>,
    ) -> Result<(), GridError> {
        let grid_size = check_grid_shape(&grid)?;
        check_samples(samples, table, grid_size)?;
        if samples.is_empty() || grid_size == 0 {
            return Ok(());
        }

        let band_height = self.get_band_height(grid_size);
        match &self.pool {
            Some(pool) => {
                pool.install(|| self.accumulate_bands(table, samples, grid, band_height))
            }
            None => self.accumulate_bands(table, samples, grid, band_height),
        }

        Ok(())
    }

    fn description(&self) -> String {
        format!("{}, {} threads", get_cpu_info(), self.num_threads())
    }
}
