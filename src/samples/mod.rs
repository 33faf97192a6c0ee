// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Visibilities to be gridded, and how they are synthesised from random
//! draws.

mod random;
#[cfg(test)]
mod tests;

pub use random::Lcg;

use std::num::NonZeroUsize;

use ndarray::prelude::*;
use vec1::Vec1;

use crate::{
    c64,
    constants::{BANDWIDTH_HZ, DRAWS_PER_SAMPLE, SPEED_OF_LIGHT, START_FREQ_HZ},
};

/// The random draws that describe one physical sample: u, v and w bases,
/// then the visibility basis. All are expected to be in `[0, 1)`.
pub type SampleDraws = [f64; DRAWS_PER_SAMPLE];

/// Baseline coordinates and visibility values before they are mapped onto the
/// grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Visibilities {
    /// \[metres\]
    pub u: Vec<f64>,
    /// \[metres\]
    pub v: Vec<f64>,
    /// \[metres\]
    pub w: Vec<f64>,

    /// The visibility values. The dimensions are `[num_samples][num_chans]`.
    pub data: Array2<c64>,
}

impl Visibilities {
    /// Synthesise visibilities from random draws. Each coordinate is spread
    /// uniformly over `[-baseline / 2, baseline / 2)`, and the visibility of
    /// channel `chan` is `(r + c, r - c)`, where `r` is the fourth draw and
    /// `c = chan / num_chans`.
    pub fn from_draws(
        draws: &[SampleDraws],
        baseline: f64,
        num_chans: NonZeroUsize,
    ) -> Visibilities {
        let to_coord = |r: f64| baseline * r - baseline / 2.0;
        let num_chans = num_chans.get();
        let u = draws.iter().map(|d| to_coord(d[0])).collect();
        let v = draws.iter().map(|d| to_coord(d[1])).collect();
        let w = draws.iter().map(|d| to_coord(d[2])).collect();
        let data = Array2::from_shape_fn((draws.len(), num_chans), |(i, chan)| {
            let r = draws[i][3];
            let c = chan as f64 / num_chans as f64;
            c64::new(r + c, r - c)
        });

        Visibilities { u, v, w, data }
    }

    pub fn num_samples(&self) -> usize {
        self.u.len()
    }

    pub fn num_chans(&self) -> usize {
        self.data.len_of(Axis(1))
    }
}

/// The frequency of each channel \[inverse wavelengths\]. The first channel is
/// at [`START_FREQ_HZ`] and the rest descend across [`BANDWIDTH_HZ`].
pub fn channel_freqs(num_chans: NonZeroUsize) -> Vec1<f64> {
    let n = num_chans.get();
    let freq = |i: usize| (START_FREQ_HZ - BANDWIDTH_HZ * i as f64 / n as f64) / SPEED_OF_LIGHT;
    let mut freqs = Vec1::with_capacity(freq(0), n);
    freqs.extend((1..n).map(freq));
    freqs
}
