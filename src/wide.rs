//! Double-double working precision.
//!
//! A [`Wide`] value is the unevaluated sum `hi + lo` of two `f64`s with
//! `|lo| <= ulp(hi) / 2`, giving roughly 106 significand bits. All arithmetic
//! is built from correctly rounded binary64 operations and `libm::fma`, so
//! results are identical on every IEEE-754 platform.
//!
//! Only the operations the sampler and the reference DFT need are provided.
//! Non-finite inputs are not supported.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// Taylor terms below `TERM_CUTOFF * |r|` no longer affect the result.
const TERM_CUTOFF: f64 = 7.703719777548943e-34; // 2^-110
const MAX_TERMS: u32 = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Wide {
    hi: f64,
    lo: f64,
}

#[inline(always)]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

/// Requires `|a| >= |b|` (or `a == 0`).
#[inline(always)]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let err = b - (s - a);
    (s, err)
}

#[inline(always)]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = libm::fma(a, b, -p);
    (p, err)
}

impl Wide {
    pub const ZERO: Wide = Wide { hi: 0.0, lo: 0.0 };
    pub const ONE: Wide = Wide { hi: 1.0, lo: 0.0 };
    pub const PI: Wide = Wide {
        hi: 3.141592653589793116e+00,
        lo: 1.224646799147353207e-16,
    };
    pub const FRAC_PI_2: Wide = Wide {
        hi: 1.570796326794896558e+00,
        lo: 6.123233995736766036e-17,
    };
    pub const FRAC_PI_4: Wide = Wide {
        hi: 7.853981633974482790e-01,
        lo: 3.061616997868383018e-17,
    };

    /// Build from two parts, renormalizing so that `|lo| <= ulp(hi) / 2`.
    pub fn from_parts(hi: f64, lo: f64) -> Self {
        let (hi, lo) = two_sum(hi, lo);
        Self { hi, lo }
    }

    /// Exact conversion; every `u64` fits in 106 bits.
    pub fn from_u64(x: u64) -> Self {
        let hi = x as f64;
        let lo = (x as i128 - hi as i128) as f64;
        Self { hi, lo }
    }

    pub fn hi(self) -> f64 {
        self.hi
    }

    pub fn lo(self) -> f64 {
        self.lo
    }

    /// Round to the nearest `f64`.
    pub fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    pub fn abs(self) -> Self {
        if self.hi < 0.0 {
            -self
        } else {
            self
        }
    }

    /// Sine and cosine. The argument is reduced by the nearest multiple of
    /// π/2 using the double-double constant, which stays accurate for
    /// moderate magnitudes; exact reduction is the caller's job for angles
    /// known as rational multiples of a turn.
    pub fn sin_cos(self) -> (Self, Self) {
        if self.abs() <= Self::FRAC_PI_4 {
            return sin_cos_taylor(self);
        }
        let q = libm::round(self.hi / Self::FRAC_PI_2.hi);
        let r = self - Self::FRAC_PI_2 * Wide::from(q);
        let (s, c) = sin_cos_taylor(r);
        match (q as i64).rem_euclid(4) {
            0 => (s, c),
            1 => (c, -s),
            2 => (-s, -c),
            _ => (-c, s),
        }
    }
}

/// Power series for `|r| <= π/4`.
fn sin_cos_taylor(r: Wide) -> (Wide, Wide) {
    let mut sin = Wide::ZERO;
    let mut cos = Wide::ONE;
    let mut term = Wide::ONE;
    let cutoff = TERM_CUTOFF * libm::fabs(r.hi).min(1.0);
    for i in 1..=MAX_TERMS {
        term = term * r / Wide::from(f64::from(i));
        if libm::fabs(term.hi) <= cutoff {
            break;
        }
        match i % 4 {
            1 => sin = sin + term,
            2 => cos = cos - term,
            3 => sin = sin - term,
            _ => cos = cos + term,
        }
    }
    (sin, cos)
}

impl From<f64> for Wide {
    fn from(x: f64) -> Self {
        Self { hi: x, lo: 0.0 }
    }
}

impl Neg for Wide {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl Add for Wide {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let (s1, s2) = two_sum(self.hi, other.hi);
        let (t1, t2) = two_sum(self.lo, other.lo);
        let (s1, s2) = quick_two_sum(s1, s2 + t1);
        let (hi, lo) = quick_two_sum(s1, s2 + t2);
        Self { hi, lo }
    }
}

impl Sub for Wide {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        self + (-other)
    }
}

impl Mul for Wide {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        let (p, e) = two_prod(self.hi, other.hi);
        let e = e + (self.hi * other.lo + self.lo * other.hi);
        let (hi, lo) = quick_two_sum(p, e);
        Self { hi, lo }
    }
}

impl Div for Wide {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        let q1 = self.hi / other.hi;
        let r = self - other * Wide::from(q1);
        let q2 = r.hi / other.hi;
        let r = r - other * Wide::from(q2);
        let q3 = r.hi / other.hi;
        let (q1, q2) = quick_two_sum(q1, q2);
        Self { hi: q1, lo: q2 } + Wide::from(q3)
    }
}
