//! Scalar helpers shared by the interpolator:
//! - mix (linear blend)
//! - progress (inverse of mix over a range)
//! - wrap (cyclic index into a list)

/// Linear interpolation of scalars.
#[inline]
pub fn mix(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Where `value` sits between `from` and `to`, unclamped.
/// A zero-width range reports 1 so the segment counts as already crossed.
#[inline]
pub fn progress(from: f64, to: f64, value: f64) -> f64 {
    let range = to - from;
    if range == 0.0 {
        1.0
    } else {
        (value - from) / range
    }
}

/// Cyclic index into a list of `len` entries.
#[inline]
pub fn wrap(len: usize, index: usize) -> usize {
    if len == 0 {
        0
    } else {
        index % len
    }
}
