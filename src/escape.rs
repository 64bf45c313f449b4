// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test.  A point `c` is iterated under
//! `z = z * z + c`, starting from `z = c`, until the orbit leaves the
//! circle of radius 2 or the iteration limit runs out.

use num::Complex;

/// The escape value of a point that never left the circle.
pub const BOUNDED: i64 = -1;

/// This is our classic iterator function, which either returns the
/// iteration on which the orbit of `point` escaped, or nothing at all
/// if it stayed bounded for `max_iterations` steps.
pub fn escape_time(point: Complex<f64>, max_iterations: usize) -> Option<usize> {
    let mut z = point;
    for i in 0..max_iterations {
        z = z * z + point;
        if z.norm_sqr() >= 4.0 {
            return Some(i);
        }
    }
    None
}

/// The escape value of the point `real + imag*i`: the escape iteration
/// as a signed number, or `BOUNDED` for points that belong to the set.
/// The result is always in `[-1, max_iterations)`.
#[inline]
pub fn escape(real: f64, imag: f64, max_iterations: usize) -> i64 {
    escape_time(Complex::new(real, imag), max_iterations).map_or(BOUNDED, |i| i as i64)
}
