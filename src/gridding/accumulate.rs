// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Accumulate visibility footprints onto the grid.

use ndarray::prelude::*;

use super::{ConvolutionTable, GridError, Sample};
use crate::c64;

/// A zeroed `grid_size` by `grid_size` grid. Rows are v, columns are u.
pub fn new_grid(grid_size: usize) -> Array2<c64> {
    Array2::zeros((grid_size, grid_size))
}

pub(crate) fn check_grid_shape(grid: &ArrayViewMut2<c64>) -> Result<usize, GridError> {
    let (rows, cols) = grid.dim();
    if rows != cols {
        return Err(GridError::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Check that a sample's whole footprint lies on the grid and that its
/// convolution-function offset lies within the table. `index` is only used
/// for reporting.
pub fn check_sample(
    index: usize,
    sample: &Sample,
    table: &ConvolutionTable,
    grid_size: usize,
) -> Result<(), GridError> {
    let support = table.support() as i64;
    let grid_size_i = grid_size as i64;
    let on_grid = |anchor: i64| anchor - support >= 0 && anchor + support < grid_size_i;
    if !on_grid(sample.iu) || !on_grid(sample.iv) {
        return Err(GridError::FootprintOutOfBounds {
            index,
            iu: sample.iu,
            iv: sample.iv,
            support: table.support(),
            grid_size,
        });
    }

    if table.footprint(sample.c_offset).is_none() {
        return Err(GridError::OffsetOutOfRange {
            index,
            c_offset: sample.c_offset,
            table_len: table.len(),
            footprint_len: table.footprint_len(),
        });
    }

    Ok(())
}

/// Check every sample with [`check_sample`], returning the first failure.
/// Samples are rejected rather than clipped; nothing should be gridded when
/// this fails.
pub fn check_samples(
    samples: &[Sample],
    table: &ConvolutionTable,
    grid_size: usize,
) -> Result<(), GridError> {
    samples
        .iter()
        .enumerate()
        .try_for_each(|(i, sample)| check_sample(i, sample, table, grid_size))
}

/// Add a single visibility's footprint onto the grid:
///
/// `grid[iv + dj - support][iu + di - support] += data * C[c_offset + di + s_size * dj]`
///
/// for `di` and `dj` in `0..s_size`. Footprint rows are visited in order, and
/// each row from left to right.
///
/// The sample must have been validated with [`check_sample`]; an invalid
/// sample causes a panic.
pub fn grid_sample(mut grid: ArrayViewMut2<c64>, table: &ConvolutionTable, sample: &Sample) {
    let support = table.support() as i64;
    let s_size = table.s_size();
    let footprint = &table.as_slice()[sample.c_offset as usize..][..table.footprint_len()];
    let u_start = (sample.iu - support) as usize;
    let v_start = (sample.iv - support) as usize;

    let mut region = grid.slice_mut(s![v_start..v_start + s_size, u_start..u_start + s_size]);
    for (kernel_row, grid_row) in footprint.chunks_exact(s_size).zip(region.outer_iter_mut()) {
        accumulate_row(grid_row, kernel_row, sample.data);
    }
}

/// Complex multiply-accumulate of one footprint row.
#[inline]
pub(crate) fn accumulate_row(grid_row: ArrayViewMut1<c64>, kernel_row: &[c64], data: c64) {
    grid_row
        .into_iter()
        .zip(kernel_row)
        .for_each(|(cell, &c)| *cell += data * c);
}
