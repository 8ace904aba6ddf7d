//! Reference discrete Fourier transform.
//!
//! This is the oracle the fixtures are checked against, so it trades speed
//! for auditability: a direct `O(n²)` summation
//!
//! ```text
//! X[k] = Σ_{j=0}^{n-1} x[j] · e^(−2πi·jk/n)
//! ```
//!
//! with no normalization on the forward transform. The inverse applies the
//! conjugate kernel and scales by `1/n`.
//!
//! Twiddle factors are computed once per transform from the exact fraction
//! `m/n`. The fraction is reduced to an octant with integer arithmetic, so
//! the only rounding before `sin_cos` is one multiply and one divide on an
//! angle no larger than π/4.

use crate::num::{Complex, Float};

/// `e^(−2πi·m/n)` for `m < n`.
pub fn twiddle<T: Float>(m: usize, n: usize) -> Complex<T> {
    debug_assert!(m < n);
    let scaled = 8 * m as u128;
    let octant = (scaled / n as u128) as u32;
    let rem = (scaled % n as u128) as usize;
    // θ = quadrant·π/2 + offset with |offset| <= π/4.
    let (quadrant, num, negate) = if octant % 2 == 0 {
        (octant / 2, rem, false)
    } else {
        ((octant + 1) / 2, n - rem, true)
    };
    let mut offset = T::frac_pi_4() * T::from_usize(num) / T::from_usize(n);
    if negate {
        offset = -offset;
    }
    let (s, c) = offset.sin_cos();
    let (sin, cos) = match quadrant % 4 {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };
    Complex::new(cos, -sin)
}

/// Table of `twiddle(m, n)` for `m` in `0..n`.
pub fn twiddles<T: Float>(n: usize) -> Vec<Complex<T>> {
    (0..n).map(|m| twiddle(m, n)).collect()
}

/// Forward DFT. The output has the same length as `input`; an empty input
/// yields an empty output.
pub fn transform<T: Float>(input: &[Complex<T>]) -> Vec<Complex<T>> {
    let table = twiddles(input.len());
    direct(input, &table, false)
}

/// Inverse DFT with `1/n` scaling, so `inverse(&transform(x)) ≈ x`.
pub fn inverse<T: Float>(input: &[Complex<T>]) -> Vec<Complex<T>> {
    let n = input.len();
    let table = twiddles(n);
    let scale = T::from_usize(n);
    direct(input, &table, true)
        .into_iter()
        .map(|c| Complex::new(c.re / scale, c.im / scale))
        .collect()
}

fn direct<T: Float>(
    input: &[Complex<T>],
    table: &[Complex<T>],
    conjugate: bool,
) -> Vec<Complex<T>> {
    let n = input.len();
    let mut out = Vec::with_capacity(n);
    for k in 0..n {
        let mut acc = Complex::zero();
        // Index of e^(∓2πi·jk/n) in the table, kept as (j·k) mod n.
        let mut idx = 0usize;
        for &x in input {
            let w = if conjugate { table[idx].conj() } else { table[idx] };
            acc = acc + x * w;
            idx += k;
            if idx >= n {
                idx -= n;
            }
        }
        out.push(acc);
    }
    out
}
