//! Numeric types shared by the sampler, the oracle and the serializer.
//!
//! Generation and transformation run in a *working* precision chosen through
//! the [`Float`] trait ([`Wide`] by default, `f64` also works). Fixtures are
//! always stored as `f64`; [`Float::to_f64`] is the single narrowing step and
//! only the serializer calls it.

pub use crate::wide::Wide;

/// Minimal float trait for the generic sampler and DFT.
///
/// Every operation must be bit-reproducible across platforms that implement
/// IEEE-754 binary64, so implementations avoid platform `libm` calls and
/// target-dependent FMA contraction.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(x: f64) -> Self;
    /// Convert a `usize`, rounding to nearest when it is not representable.
    fn from_usize(x: usize) -> Self;
    /// Narrow to double precision (round to nearest).
    fn to_f64(self) -> f64;
    /// Simultaneous sine and cosine. Most accurate for `|self| <= π/4`;
    /// callers with exact angle information should reduce first.
    fn sin_cos(self) -> (Self, Self);
    fn frac_pi_4() -> Self;
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn from_usize(x: usize) -> Self {
        x as f64
    }
    fn to_f64(self) -> f64 {
        self
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincos(self)
    }
    fn frac_pi_4() -> Self {
        core::f64::consts::FRAC_PI_4
    }
}

impl Float for Wide {
    fn zero() -> Self {
        Wide::ZERO
    }
    fn one() -> Self {
        Wide::ONE
    }
    fn from_f64(x: f64) -> Self {
        Wide::from(x)
    }
    fn from_usize(x: usize) -> Self {
        Wide::from_u64(x as u64)
    }
    fn to_f64(self) -> f64 {
        Wide::to_f64(self)
    }
    fn sin_cos(self) -> (Self, Self) {
        Wide::sin_cos(self)
    }
    fn frac_pi_4() -> Self {
        Wide::FRAC_PI_4
    }
}

/// Complex number in working precision `T`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
    /// `0 + 0i`.
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }
    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
    #[inline(always)]
    pub fn norm_sqr(self) -> T {
        self.re * self.re + self.im * self.im
    }
    /// Narrow both components to double precision.
    pub fn to_f64(self) -> Complex64 {
        Complex64::new(self.re.to_f64(), self.im.to_f64())
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
}

// No fused multiply-add here: contraction would make results depend on the
// target's features.
impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }
}

pub type Complex64 = Complex<f64>;
pub type ComplexWide = Complex<Wide>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_operations() {
        let a = Complex64::new(1.0, -2.0);
        let b = Complex64::new(3.0, 4.0);
        let c = a * b;
        assert_eq!(c, Complex64::new(11.0, -2.0));
        let n = -a;
        assert_eq!(n.re, -1.0);
        assert_eq!(n.im, 2.0);
        assert_eq!(a.conj(), Complex64::new(1.0, 2.0));
        assert_eq!(b.norm_sqr(), 25.0);
    }

    #[test]
    fn wide_complex_narrows_componentwise() {
        let c = ComplexWide::new(Wide::from(0.25), -Wide::from(0.125));
        assert_eq!(c.to_f64(), Complex64::new(0.25, -0.125));
    }

    #[test]
    fn f64_sin_cos_matches_std() {
        for &x in &[0.0, 0.1, -0.5, core::f64::consts::FRAC_PI_4] {
            let (s, c) = <f64 as Float>::sin_cos(x);
            assert!((s - x.sin()).abs() < 1e-15);
            assert!((c - x.cos()).abs() < 1e-15);
        }
    }
}
