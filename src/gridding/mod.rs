// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The W-projection gridding core.
//!
//! Gridding happens in three steps:
//!
//! 1. A [`ConvolutionTable`] is built once from the physical parameters;
//! 2. Each visibility is mapped to a grid anchor and a table offset
//!    ([`map_offsets`]);
//! 3. Each visibility's footprint is accumulated onto the grid
//!    ([`grid_sample`], usually driven by a
//!    [`GridDispatch`](crate::dispatch::GridDispatch)).

mod accumulate;
mod convolution;
mod error;
mod offsets;

pub use accumulate::{check_sample, check_samples, grid_sample, new_grid};
pub(crate) use accumulate::{accumulate_row, check_grid_shape};
pub use convolution::ConvolutionTable;
pub use error::{ConvolutionError, GridError, MapError};
pub use offsets::{map_offsets, OffsetMapper};

use crate::c64;

/// A single visibility, ready to be gridded. There is one of these per
/// physical sample per frequency channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    /// The visibility value.
    pub data: c64,

    /// The grid column this sample is anchored to. The footprint spans
    /// `iu - support..=iu + support`.
    pub iu: i64,

    /// The grid row this sample is anchored to. The footprint spans
    /// `iv - support..=iv + support`.
    pub iv: i64,

    /// The index of the first convolution-function entry used by this
    /// sample. It encodes the sample's sub-pixel position and w plane.
    pub c_offset: i64,
}
