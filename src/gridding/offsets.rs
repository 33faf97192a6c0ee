// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Map visibilities to grid anchors and convolution-function offsets.

use log::debug;
use rayon::prelude::*;

use super::{ConvolutionTable, MapError, Sample};
use crate::{math::floor_to_i64, samples::Visibilities};

/// The table-derived quantities needed to place a visibility on the grid. The
/// table's contents aren't needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetMapper {
    /// The size of one grid cell \[wavelengths\].
    pub cell_size: f64,

    /// The size of one w plane \[wavelengths\].
    pub w_cell_size: f64,

    pub w_size: usize,
    pub grid_size: usize,
    pub support: usize,
    pub over_sample: usize,
}

impl OffsetMapper {
    pub fn new(table: &ConvolutionTable, cell_size: f64, grid_size: usize) -> OffsetMapper {
        OffsetMapper {
            cell_size,
            w_cell_size: table.w_cell_size(),
            w_size: table.w_size(),
            grid_size,
            support: table.support(),
            over_sample: table.over_sample(),
        }
    }

    /// Scale a u or v coordinate into pixels and split it into the integer
    /// pixel (before shifting to the grid centre) and the oversampled
    /// fractional pixel. The fractional pixel is always in
    /// `0..over_sample`.
    pub fn split_coord(&self, coord: f64, freq: f64) -> (i64, i64) {
        let scaled = freq * coord / self.cell_size;
        let pixel = floor_to_i64(scaled);
        // `scaled - pixel` rounds to 1.0 for tiny negative coordinates.
        let frac = floor_to_i64(self.over_sample as f64 * (scaled - pixel as f64))
            .min(self.over_sample as i64 - 1);
        (pixel, frac)
    }

    /// The w-plane index of a w coordinate at a frequency. This can lie
    /// outside `0..w_size` if `w` exceeds the range of the table.
    pub fn w_plane(&self, w: f64, freq: f64) -> i64 {
        let scaled = freq * w / self.w_cell_size;
        (self.w_size / 2) as i64 + floor_to_i64(scaled)
    }

    /// Get `(iu, iv, c_offset)` for a visibility with coordinates `(u, v, w)`
    /// \[metres\] at frequency `freq` \[inverse wavelengths\].
    pub fn map(&self, u: f64, v: f64, w: f64, freq: f64) -> (i64, i64, i64) {
        let half_grid = (self.grid_size / 2) as i64;
        let (iu, frac_u) = self.split_coord(u, freq);
        let (iv, frac_v) = self.split_coord(v, freq);
        let w_off = self.w_plane(w, freq);

        let s_size = (2 * self.support + 1) as i64;
        let over_sample = self.over_sample as i64;
        let c_offset = s_size * s_size * (frac_u + over_sample * (frac_v + over_sample * w_off));
        (iu + half_grid, iv + half_grid, c_offset)
    }
}

/// Produce a [`Sample`] for every visibility. The samples are ordered by
/// physical sample and then channel, i.e. the sample for physical sample `i`
/// and channel `chan` is at `i * num_chans + chan`.
///
/// `freqs`: The frequency of each channel \[inverse wavelengths\].
///
/// # Errors
///
/// This function will return an error if the coordinate, visibility and
/// frequency lengths are inconsistent. Nothing is mapped in that case.
pub fn map_offsets(
    vis: &Visibilities,
    freqs: &[f64],
    mapper: &OffsetMapper,
) -> Result<Vec<Sample>, MapError> {
    let num_samples = vis.u.len();
    if vis.v.len() != num_samples || vis.w.len() != num_samples {
        return Err(MapError::CoordLengthMismatch {
            u: vis.u.len(),
            v: vis.v.len(),
            w: vis.w.len(),
        });
    }
    let (rows, num_chans) = vis.data.dim();
    if rows != num_samples {
        return Err(MapError::DataShapeMismatch { num_samples, rows });
    }
    if num_chans == 0 {
        return Err(MapError::NoChannels);
    }
    if freqs.len() != num_chans {
        return Err(MapError::FreqLengthMismatch {
            vis: num_chans,
            freqs: freqs.len(),
        });
    }
    debug!("Mapping offsets for {num_samples} samples x {num_chans} channels");

    let mut samples = vec![Sample::default(); num_samples * num_chans];
    // Every physical sample writes to its own block of channels.
    samples
        .par_chunks_exact_mut(num_chans)
        .enumerate()
        .for_each(|(i, chan_samples)| {
            let (u, v, w) = (vis.u[i], vis.v[i], vis.w[i]);
            chan_samples
                .iter_mut()
                .zip(freqs)
                .zip(vis.data.row(i))
                .for_each(|((sample, &freq), &data)| {
                    let (iu, iv, c_offset) = mapper.map(u, v, w, freq);
                    *sample = Sample {
                        data,
                        iu,
                        iv,
                        c_offset,
                    };
                });
        });

    Ok(samples)
}
