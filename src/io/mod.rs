// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! File stuff: reading sample coordinates and writing grids.
//!
//! All binary files are streams of little-endian `f64`s. A sample file holds
//! four values per physical sample (u, v, w and visibility bases); a grid file
//! holds `grid_size * grid_size` cells in row-major order, each cell being its
//! real then imaginary part.

mod error;
mod read;
mod write;

pub use error::{FileWriteError, ReadGridError, ReadSamplesError, WriteGridError};
pub use read::{read_grid, read_sample_draws, read_sample_draws_from_file};
pub(crate) use write::can_write_to_file;
pub use write::{write_grid, write_grid_to_file, write_sample_draws, write_sample_draws_to_file};

// The grid file layout is the in-memory layout of the complex type.
static_assertions::assert_eq_size!(crate::c64, [f64; 2]);
