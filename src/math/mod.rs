// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.

#[cfg(test)]
mod tests;

use crate::c64;

/// Complex exponential. The argument is assumed to be purely imaginary.
///
/// This function doesn't actually use complex numbers; it just returns the real
/// and imag components from Euler's formula (i.e. e^{ix} = cos{x} + i sin{x}).
///
/// # Examples
///
/// `assert_abs_diff_eq!(cexp(PI), c64::new(-1.0, 0.0));`
#[inline]
pub(crate) fn cexp(x: f64) -> c64 {
    let (im, re) = x.sin_cos();
    c64::new(re, im)
}

/// The mathematical floor of `x` as an integer, i.e. rounding towards negative
/// infinity. A cast alone truncates towards zero, which places negative
/// coordinates one cell too far to the right.
///
/// # Examples
///
/// `assert_eq!(floor_to_i64(-0.3), -1);`
#[inline]
pub(crate) fn floor_to_i64(x: f64) -> i64 {
    let truncated = x as i64;
    if x < truncated as f64 {
        truncated - 1
    } else {
        truncated
    }
}

/// Sum the absolute values of complex numbers in order. The order is fixed so
/// that repeated sums over the same data are bit-identical.
pub(crate) fn sum_abs(values: &[c64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v.norm())
}
