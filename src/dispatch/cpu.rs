// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sequential gridding. This defines the reference result.

use ndarray::ArrayViewMut2;

use super::{get_cpu_info, GridDispatch};
use crate::{
    c64,
    gridding::{
        check_grid_shape, check_samples, grid_sample, ConvolutionTable, GridError, Sample,
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct CpuSequential;

impl GridDispatch for CpuSequential {
    fn accumulate(
        &self,
        table: &ConvolutionTable,
        samples: &[Sample],
        mut grid: ArrayViewMut2<c64>,
    ) -> Result<(), GridError> {
        let grid_size = check_grid_shape(&grid)?;
        check_samples(samples, table, grid_size)?;

        for sample in samples {
            grid_sample(grid.view_mut(), table, sample);
        }

        Ok(())
    }

    fn description(&self) -> String {
        format!("{}, sequential", get_cpu_info())
    }
}
