// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Read sample coordinates and grids.

use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::Path,
};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace};
use ndarray::prelude::*;

use super::{ReadGridError, ReadSamplesError};
use crate::{c64, constants::DRAWS_PER_SAMPLE, samples::SampleDraws};

/// Read the random draws for `num_samples` physical samples. The reader
/// must supply at least `4 * num_samples` values; anything after that is
/// ignored.
pub fn read_sample_draws<R: Read>(
    mut reader: R,
    num_samples: usize,
) -> Result<Vec<SampleDraws>, ReadSamplesError> {
    let mut all_draws = Vec::with_capacity(num_samples);
    for i_sample in 0..num_samples {
        let mut draws = [0.0; DRAWS_PER_SAMPLE];
        for (i_draw, draw) in draws.iter_mut().enumerate() {
            *draw = match reader.read_f64::<LittleEndian>() {
                Ok(d) => d,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    return Err(ReadSamplesError::Truncated {
                        expected: num_samples,
                        got: i_sample,
                    })
                }
                Err(e) => return Err(e.into()),
            };
            if !draw.is_finite() {
                return Err(ReadSamplesError::NotFinite {
                    index: i_sample * DRAWS_PER_SAMPLE + i_draw,
                    value: *draw,
                });
            }
        }
        all_draws.push(draws);
    }

    let mut extra = [0; 1];
    if reader.read(&mut extra)? > 0 {
        debug!("Ignoring sample data after the first {num_samples} samples");
    }

    Ok(all_draws)
}

/// Read the random draws for `num_samples` physical samples from a file.
pub fn read_sample_draws_from_file(
    file: &Path,
    num_samples: usize,
) -> Result<Vec<SampleDraws>, ReadSamplesError> {
    trace!("Reading {num_samples} samples from {}", file.display());
    let fh = File::open(file).map_err(|err| ReadSamplesError::Open {
        file: file.to_path_buf(),
        err,
    })?;
    read_sample_draws(BufReader::new(fh), num_samples)
}

/// Read a `grid_size` by `grid_size` grid, as written by
/// [`write_grid`](super::write_grid).
pub fn read_grid<R: Read>(mut reader: R, grid_size: usize) -> Result<Array2<c64>, ReadGridError> {
    let expected = grid_size * grid_size;
    let mut grid = Array2::zeros((grid_size, grid_size));
    for (got, cell) in grid.iter_mut().enumerate() {
        let mut read_cell = || -> std::io::Result<c64> {
            let re = reader.read_f64::<LittleEndian>()?;
            let im = reader.read_f64::<LittleEndian>()?;
            Ok(c64::new(re, im))
        };
        *cell = match read_cell() {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(ReadGridError::Truncated { expected, got })
            }
            Err(e) => return Err(e.into()),
        };
    }

    Ok(grid)
}
