// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::num::NonZeroUsize;

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_lcg_reference_sequence() {
    let mut lcg = Lcg::default();
    let ints: Vec<u32> = (0..10).map(|_| lcg.next_int()).collect();
    assert_eq!(
        ints,
        [16838, 38526, 10113, 50283, 63819, 38395, 55778, 40187, 48980, 4086]
    );
}

#[test]
fn test_lcg_seeds_differ() {
    let mut a = Lcg::new(1);
    let mut b = Lcg::new(2);
    assert_ne!(a.next_int(), b.next_int());

    // Same seed, same sequence.
    let mut a = Lcg::new(42);
    let mut b = Lcg::new(42);
    for _ in 0..100 {
        assert_eq!(a.next_int(), b.next_int());
    }
}

#[test]
fn test_lcg_units_in_range() {
    let mut lcg = Lcg::default();
    for _ in 0..10000 {
        let r = lcg.next_unit();
        assert!((0.0..1.0).contains(&r), "{r} is out of range");
    }
}

#[test]
fn test_sample_draws_are_consecutive() {
    let draws = Lcg::default().sample_draws(3);
    let mut lcg = Lcg::default();
    for sample in draws {
        for d in sample {
            assert_eq!(d, lcg.next_unit());
        }
    }
}

#[test]
fn test_visibilities_from_draws() {
    let draws = [[0.0, 0.5, 0.75, 0.25], [0.25, 1.0, 0.5, 0.5]];
    let vis = Visibilities::from_draws(&draws, 100.0, NonZeroUsize::new(4).unwrap());
    assert_eq!(vis.num_samples(), 2);
    assert_eq!(vis.num_chans(), 4);

    assert_abs_diff_eq!(vis.u[0], -50.0);
    assert_abs_diff_eq!(vis.v[0], 0.0);
    assert_abs_diff_eq!(vis.w[0], 25.0);
    assert_abs_diff_eq!(vis.u[1], -25.0);
    assert_abs_diff_eq!(vis.v[1], 50.0);
    assert_abs_diff_eq!(vis.w[1], 0.0);

    assert_eq!(vis.data[(0, 0)], c64::new(0.25, 0.25));
    assert_eq!(vis.data[(0, 2)], c64::new(0.75, -0.25));
    assert_eq!(vis.data[(1, 1)], c64::new(0.75, 0.25));
    assert_eq!(vis.data[(1, 3)], c64::new(1.25, -0.25));
}

#[test]
fn test_channel_freqs() {
    let freqs = channel_freqs(NonZeroUsize::new(1).unwrap());
    assert_eq!(freqs.len(), 1);
    assert_abs_diff_eq!(freqs[0], 1.4e9 / 2.998e8);

    let freqs = channel_freqs(NonZeroUsize::new(4).unwrap());
    assert_eq!(freqs.len(), 4);
    assert_abs_diff_eq!(freqs[0], 1.4e9 / 2.998e8);
    assert_abs_diff_eq!(freqs[2], (1.4e9 - 1.0e5) / 2.998e8);
    // Frequencies descend.
    assert!(freqs.windows(2).all(|w| w[0] > w[1]));
}
