// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from gridding.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvolutionError {
    #[error("The number of w planes cannot be 0")]
    ZeroWSize,

    #[error("The oversampling factor cannot be 0")]
    ZeroOverSample,

    #[error("The cell size must be a positive, finite number; got {0}")]
    InvalidCellSize(f64),

    #[error("The reference frequency must be a positive, finite number of inverse wavelengths; got {0}")]
    InvalidFreq(f64),

    #[error("The baseline extent must be a positive, finite number of metres; got {0}")]
    InvalidBaseline(f64),

    #[error("A convolution function with support {support}, oversampling {over_sample} and {w_size} w planes needs {expected} entries, but {got} were supplied")]
    BadLength {
        support: usize,
        over_sample: usize,
        w_size: usize,
        expected: usize,
        got: usize,
    },
}

#[derive(Error, Debug)]
pub enum MapError {
    #[error("There are {u} u, {v} v and {w} w coordinates; these must all be the same length")]
    CoordLengthMismatch { u: usize, v: usize, w: usize },

    #[error("There are {num_samples} sets of coordinates, but visibilities for {rows} samples")]
    DataShapeMismatch { num_samples: usize, rows: usize },

    #[error("There are {vis} channels of visibilities but {freqs} channel frequencies")]
    FreqLengthMismatch { vis: usize, freqs: usize },

    #[error("At least one frequency channel is required")]
    NoChannels,
}

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Sample {index} is anchored at (u {iu}, v {iv}); with a support of {support}, its footprint falls outside the {grid_size}x{grid_size} grid")]
    FootprintOutOfBounds {
        index: usize,
        iu: i64,
        iv: i64,
        support: usize,
        grid_size: usize,
    },

    #[error("Sample {index} has convolution-function offset {c_offset}, but the table has {table_len} entries and a footprint needs {footprint_len}. Is its w coordinate outside the range of the w planes?")]
    OffsetOutOfRange {
        index: usize,
        c_offset: i64,
        table_len: usize,
        footprint_len: usize,
    },

    #[error("The grid must be square, but it has shape {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}
