// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_cexp() {
    let c = cexp(PI);
    assert_abs_diff_eq!(c.re, -1.0, epsilon = 1e-15);
    assert_abs_diff_eq!(c.im, 0.0, epsilon = 1e-15);

    let c = cexp(FRAC_PI_2);
    assert_abs_diff_eq!(c.re, 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(c.im, 1.0, epsilon = 1e-15);

    let c = cexp(0.0);
    assert_eq!(c, c64::new(1.0, 0.0));
}

#[test]
fn test_floor_positive() {
    assert_eq!(floor_to_i64(0.0), 0);
    assert_eq!(floor_to_i64(0.3), 0);
    assert_eq!(floor_to_i64(2.0), 2);
    assert_eq!(floor_to_i64(2.999), 2);
}

#[test]
fn test_floor_negative() {
    // Truncation would give 0 here.
    assert_eq!(floor_to_i64(-0.3), -1);
    assert_eq!(floor_to_i64(-1.0), -1);
    assert_eq!(floor_to_i64(-1.5), -2);
    assert_eq!(floor_to_i64(-2.0), -2);
}

#[test]
fn test_floor_matches_std() {
    for i in -1000..1000 {
        let x = i as f64 * 0.037;
        assert_eq!(floor_to_i64(x), x.floor() as i64, "x = {x}");
    }
}

#[test]
fn test_sum_abs() {
    assert_abs_diff_eq!(sum_abs(&[]), 0.0);
    assert_abs_diff_eq!(
        sum_abs(&[c64::new(3.0, 4.0), c64::new(-1.0, 0.0), c64::new(0.0, -2.0)]),
        8.0
    );
}
