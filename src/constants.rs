// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision.
 */

/// The oversampling factor of the convolution-function lookup table. This is
/// not user configurable.
pub const OVERSAMPLE: usize = 8;

/// The speed of light used when converting channel frequencies into inverse
/// wavelengths \[m/s\]. This is deliberately not the exact value.
pub const SPEED_OF_LIGHT: f64 = 2.998e8;

/// The frequency of the first channel \[Hz\].
pub const START_FREQ_HZ: f64 = 1.4e9;

/// The total bandwidth spanned by all channels \[Hz\]. Channel `i` of `n` sits
/// at `START_FREQ_HZ - BANDWIDTH_HZ * i / n`.
pub const BANDWIDTH_HZ: f64 = 2.0e5;

/// The default side length of the grid \[pixels\].
pub const DEFAULT_GRID_SIZE: usize = 4096;

/// The default number of physical samples to grid.
pub const DEFAULT_NUM_SAMPLES: usize = 160_000;

/// The default number of frequency channels per sample.
pub const DEFAULT_NUM_CHANNELS: usize = 1;

/// The default maximum baseline extent \[metres\].
pub const DEFAULT_BASELINE: f64 = 2000.0;

/// The default size of a grid cell \[wavelengths\].
pub const DEFAULT_CELL_SIZE: f64 = 5.0;

/// The default number of w planes in the convolution-function lookup table.
pub const DEFAULT_W_SIZE: usize = 33;

/// The default file that gridded visibilities are written to.
pub const DEFAULT_GRID_FILENAME: &str = "grid.dat";

/// The default file that random sample coordinates are read from and written
/// to.
pub const DEFAULT_SAMPLES_FILENAME: &str = "randnum.dat";

/// The number of random draws that describe one physical sample (u, v, w and
/// the visibility value).
pub const DRAWS_PER_SAMPLE: usize = 4;
