// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The oversampled, w-dependent convolution-function lookup table.

use log::{debug, trace};
use rayon::prelude::*;

use super::ConvolutionError;
use crate::{
    c64,
    constants::OVERSAMPLE,
    math::{cexp, sum_abs},
};

/// The convolution function used for W projection, tabulated at
/// `over_sample` sub-pixel offsets in each direction, for each of `w_size` w
/// planes.
///
/// The entries are stored flat with dimensions
/// `[w_size][over_sample (v)][over_sample (u)][s_size (v)][s_size (u)]`,
/// where `s_size = 2 * support + 1`. One `s_size * s_size` slice of the
/// table is the footprint of a single visibility.
#[derive(Debug, Clone)]
pub struct ConvolutionTable {
    data: Vec<c64>,
    support: usize,
    over_sample: usize,
    w_size: usize,
    w_cell_size: f64,
}

impl ConvolutionTable {
    /// Build the convolution-function table with the standard oversampling
    /// factor ([`OVERSAMPLE`]).
    ///
    /// `freq`: The representative frequency \[inverse wavelengths\]. This is
    /// normally the frequency of the first channel.
    ///
    /// `cell_size`: The size of one grid cell \[wavelengths\].
    ///
    /// `baseline`: The maximum baseline extent \[metres\]. This sets the
    /// support of the kernel and the size of a w cell.
    ///
    /// `w_size`: The number of w planes.
    pub fn new(
        freq: f64,
        cell_size: f64,
        baseline: f64,
        w_size: usize,
    ) -> Result<ConvolutionTable, ConvolutionError> {
        Self::with_over_sample(freq, cell_size, baseline, w_size, OVERSAMPLE)
    }

    /// Build the convolution-function table with a non-standard oversampling
    /// factor. Mostly useful for small tables in tests.
    pub fn with_over_sample(
        freq: f64,
        cell_size: f64,
        baseline: f64,
        w_size: usize,
        over_sample: usize,
    ) -> Result<ConvolutionTable, ConvolutionError> {
        if w_size == 0 {
            return Err(ConvolutionError::ZeroWSize);
        }
        if over_sample == 0 {
            return Err(ConvolutionError::ZeroOverSample);
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(ConvolutionError::InvalidCellSize(cell_size));
        }
        if !freq.is_finite() || freq <= 0.0 {
            return Err(ConvolutionError::InvalidFreq(freq));
        }
        if !baseline.is_finite() || baseline <= 0.0 {
            return Err(ConvolutionError::InvalidBaseline(baseline));
        }

        let support = Self::support_for(freq, cell_size, baseline);
        let w_cell_size = 2.0 * baseline * freq / w_size as f64;
        let s_size = 2 * support + 1;
        debug!("Convolution function support: {support} pixels (footprint {s_size}x{s_size})");
        debug!("w cell size: {w_cell_size} wavelengths");

        let plane_len = s_size * s_size * over_sample * over_sample;
        let mut data = vec![c64::default(); plane_len * w_size];
        trace!(
            "Allocated {} convolution-function entries ({} MiB)",
            data.len(),
            data.len() * std::mem::size_of::<c64>() / 1024 / 1024
        );

        // Each w plane is independent of the others.
        data.par_chunks_exact_mut(plane_len)
            .enumerate()
            .for_each(|(k, plane)| {
                let w = k as i64 - (w_size / 2) as i64;
                fill_w_plane(plane, w, w_cell_size, freq, cell_size, support, over_sample)
            });

        let mut table = ConvolutionTable {
            data,
            support,
            over_sample,
            w_size,
            w_cell_size,
        };
        table.normalise();
        Ok(table)
    }

    /// The support \[pixels\] of a table built with these parameters. This is
    /// cheap, unlike building the table.
    pub fn support_for(freq: f64, cell_size: f64, baseline: f64) -> usize {
        (1.5 * (baseline.abs() * cell_size * freq).sqrt() / cell_size).floor() as usize
    }

    /// Wrap pre-computed convolution-function entries. The entries must be laid
    /// out as described on [`ConvolutionTable`]; no normalisation is applied.
    pub fn from_raw(
        data: Vec<c64>,
        support: usize,
        over_sample: usize,
        w_size: usize,
        w_cell_size: f64,
    ) -> Result<ConvolutionTable, ConvolutionError> {
        if w_size == 0 {
            return Err(ConvolutionError::ZeroWSize);
        }
        if over_sample == 0 {
            return Err(ConvolutionError::ZeroOverSample);
        }
        let s_size = 2 * support + 1;
        let expected = s_size * s_size * over_sample * over_sample * w_size;
        if data.len() != expected {
            return Err(ConvolutionError::BadLength {
                support,
                over_sample,
                w_size,
                expected,
                got: data.len(),
            });
        }

        Ok(ConvolutionTable {
            data,
            support,
            over_sample,
            w_size,
            w_cell_size,
        })
    }

    /// Scale the table so that the sum of the absolute values of all entries
    /// is `w_size * over_sample^2`.
    fn normalise(&mut self) {
        let sum = sum_abs(&self.data);
        let scale = (self.w_size * self.over_sample * self.over_sample) as f64 / sum;
        trace!("Convolution function sum before normalisation: {sum}");
        self.data.iter_mut().for_each(|c| *c *= scale);
    }

    /// The half-width of the kernel footprint \[pixels\].
    pub fn support(&self) -> usize {
        self.support
    }

    /// The full width of the kernel footprint, `2 * support + 1` \[pixels\].
    pub fn s_size(&self) -> usize {
        2 * self.support + 1
    }

    pub fn over_sample(&self) -> usize {
        self.over_sample
    }

    pub fn w_size(&self) -> usize {
        self.w_size
    }

    /// The size of one w plane \[wavelengths\].
    pub fn w_cell_size(&self) -> f64 {
        self.w_cell_size
    }

    /// The number of entries in a single footprint, `s_size^2`.
    pub fn footprint_len(&self) -> usize {
        self.s_size() * self.s_size()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[c64] {
        &self.data
    }

    /// All of the entries for the `k`th w plane.
    pub fn w_plane(&self, k: usize) -> Option<&[c64]> {
        self.data.chunks_exact(self.data.len() / self.w_size).nth(k)
    }

    /// The `s_size * s_size` entries starting at `c_offset`, stored row-major
    /// (v then u). `None` is returned if any part of the footprint lies
    /// outside the table.
    pub fn footprint(&self, c_offset: i64) -> Option<&[c64]> {
        let start = usize::try_from(c_offset).ok()?;
        self.data.get(start..start.checked_add(self.footprint_len())?)
    }
}

/// Populate a single w plane. `w` is the signed w-plane number, i.e. the plane
/// index less half the number of planes.
///
/// The exact W-projection kernel is the convolution of the Fresnel term with
/// an anti-aliasing function, normally obtained by Fourier transforms. This
/// uses an approximation instead: a Gaussian taper for the zero plane and a
/// pure Fresnel-like phase elsewhere, with the radial term
/// `r2 = i2 + j2 + sqrt(i2 * j2)`.
fn fill_w_plane(
    plane: &mut [c64],
    w: i64,
    w_cell_size: f64,
    freq: f64,
    cell_size: f64,
    support: usize,
    over_sample: usize,
) {
    let s_size = 2 * support + 1;
    let c_centre = support as f64;
    let w = w as f64;
    let f_scale = (w.abs() * w_cell_size * freq).sqrt() / cell_size;

    for osj in 0..over_sample {
        for osi in 0..over_sample {
            for j in 0..s_size {
                let j2 = (j as f64 - c_centre + osj as f64 / over_sample as f64).powi(2);
                for i in 0..s_size {
                    let i2 = (i as f64 - c_centre + osi as f64 / over_sample as f64).powi(2);
                    let r2 = j2 + i2 + (j2 * i2).sqrt();

                    let index = i + s_size * (j + s_size * (osi + over_sample * osj));
                    plane[index] = if w != 0.0 {
                        cexp(r2 / (w * f_scale))
                    } else {
                        c64::new((-r2).exp(), 0.0)
                    };
                }
            }
        }
    }
}
