// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
W-projection gridding of radio-interferometric visibilities.

Irregularly-sampled complex visibilities, each tagged with (u, v, w) baseline
coordinates, are convolved with an oversampled, w-dependent kernel and
accumulated onto a regular complex grid ready for an inverse FFT.
 */

mod cli;
pub mod constants;
pub mod dispatch;
pub mod gridding;
pub mod io;
pub(crate) mod math;
mod params;
pub mod samples;

use crossbeam_utils::atomic::AtomicCell;

// Re-exports.
pub use cli::{Wgrid, WgridError};
pub use dispatch::{new_grid_dispatch, CpuParallel, CpuSequential, DispatchKind, GridDispatch};
pub use gridding::{
    grid_sample, map_offsets, new_grid, ConvolutionError, ConvolutionTable, GridError, MapError,
    Sample,
};
pub use samples::{channel_freqs, Lcg, Visibilities};

/// Complex double-precision value; the type of visibilities, kernel entries
/// and grid cells.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex<f64>;

/// Should progress bars be drawn?
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
