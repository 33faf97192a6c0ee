// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A tiny, reproducible pseudo-random number generator. This is the linear
//! congruential generator from Kernighan & Ritchie's "The C Programming
//! Language"; it is used so that sample coordinates can be generated without
//! an input file and still be the same on every machine.

use super::SampleDraws;
use crate::constants::DRAWS_PER_SAMPLE;

const MULTIPLIER: u32 = 1103515245;
const INCREMENT: u32 = 12345;
const INT_MAX: u32 = i32::MAX as u32;

/// The number of distinct values [`Lcg::next_int`] can produce; only the upper
/// 16 bits of the 32-bit state are used.
const OUTPUT_RANGE: f64 = 65536.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    next: u32,
}

impl Default for Lcg {
    fn default() -> Self {
        Lcg::new(1)
    }
}

impl Lcg {
    pub fn new(seed: u32) -> Lcg {
        Lcg { next: seed }
    }

    /// The next pseudo-random integer.
    pub fn next_int(&mut self) -> u32 {
        self.next = self.next.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.next >> 16) % INT_MAX
    }

    /// The next pseudo-random number, uniform in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.next_int() as f64 / OUTPUT_RANGE
    }

    /// Draw the random numbers for `num_samples` physical samples. The draws
    /// for each sample are taken consecutively.
    pub fn sample_draws(&mut self, num_samples: usize) -> Vec<SampleDraws> {
        (0..num_samples)
            .map(|_| {
                let mut draws = [0.0; DRAWS_PER_SAMPLE];
                draws.iter_mut().for_each(|d| *d = self.next_unit());
                draws
            })
            .collect()
    }
}
