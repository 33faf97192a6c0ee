// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to execute the accumulation of visibilities onto a grid.

mod cpu;
mod parallel;
#[cfg(test)]
mod tests;

pub use cpu::CpuSequential;
pub use parallel::CpuParallel;

use std::num::NonZeroUsize;

use ndarray::ArrayViewMut2;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    c64,
    gridding::{ConvolutionTable, GridError, Sample},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum DispatchKind {
    /// A single pass over the samples on one CPU core.
    #[strum(serialize = "cpu")]
    #[serde(rename = "cpu")]
    Cpu,

    /// The grid is split into bands of rows, and the bands are filled
    /// concurrently. The result is identical to [`DispatchKind::Cpu`].
    #[strum(serialize = "cpu-parallel")]
    #[serde(rename = "cpu-parallel")]
    CpuParallel,
}

/// An object that accumulates visibility footprints onto a grid.
///
/// Implementors must produce the same result as gridding each sample in
/// index order with [`crate::grid_sample`]; any deviation must be limited to
/// floating-point rounding.
pub trait GridDispatch: Send + Sync {
    /// Add the footprints of all `samples` onto `grid`. *The grid is not
    /// cleared as part of this function.*
    ///
    /// # Errors
    ///
    /// This function will return an error if the grid isn't square or if any
    /// sample's footprint or convolution-function offset is out of range. The
    /// grid is not modified in that case.
    fn accumulate(
        &self,
        table: &ConvolutionTable,
        samples: &[Sample],
        grid: ArrayViewMut2<c64>,
    ) -> Result<(), GridError>;

    /// A description of what is doing the gridding.
    fn description(&self) -> String;
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Couldn't build a gridding thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Create a [`GridDispatch`] trait object. `num_threads` is only used for
/// [`DispatchKind::CpuParallel`]; if it isn't given, rayon's global pool is
/// used.
pub fn new_grid_dispatch(
    kind: DispatchKind,
    num_threads: Option<NonZeroUsize>,
) -> Result<Box<dyn GridDispatch>, DispatchError> {
    match kind {
        DispatchKind::Cpu => Ok(Box::new(CpuSequential)),
        DispatchKind::CpuParallel => {
            let dispatch = match num_threads {
                Some(n) => CpuParallel::with_threads(n)?,
                None => CpuParallel::new(),
            };
            Ok(Box::new(dispatch))
        }
    }
}

/// Get a formatted string with information on the CPU used for gridding.
pub(crate) fn get_cpu_info() -> String {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        // Non-exhaustive but perhaps most-interesting CPU features.
        let avx = std::arch::is_x86_feature_detected!("avx");
        let avx2 = std::arch::is_x86_feature_detected!("avx2");
        let avx512 = std::arch::is_x86_feature_detected!("avx512f");

        match (avx512, avx2, avx) {
            (true, _, _) => {
                format!("{} CPU (AVX512 available)", std::env::consts::ARCH)
            }
            (false, true, _) => {
                format!("{} CPU (AVX2 available)", std::env::consts::ARCH)
            }
            (false, false, true) => {
                format!("{} CPU (AVX available)", std::env::consts::ARCH)
            }
            (false, false, false) => {
                format!("{} CPU (AVX unavailable!)", std::env::consts::ARCH)
            }
        }
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    format!("{} CPU", std::env::consts::ARCH)
}
