//! Accuracy metric for judging a DFT under test against the fixtures.
//!
//! Uses the FFTW accuracy method: the L2 norm of the difference over the L2
//! norm of the reference, taken over interleaved real and imaginary parts.

use crate::num::Complex64;

/// Error of a well-behaved double-precision FFT relative to the oracle,
/// before the `sqrt(ln n)` growth factor: `10^-15.55`.
pub fn base_epsilon() -> f64 {
    libm::pow(10.0, -15.55)
}

/// Why two sequences could not be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareError {
    /// The sequence under test and the reference differ in length.
    MismatchedLengths { actual: usize, expected: usize },
}

impl core::fmt::Display for CompareError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CompareError::MismatchedLengths { actual, expected } => {
                write!(f, "length {actual} does not match reference length {expected}")
            }
        }
    }
}

impl std::error::Error for CompareError {}

/// `‖actual − expected‖₂ / ‖expected‖₂`.
///
/// A zero reference gives `0` when `actual` is also zero and infinity
/// otherwise.
pub fn relative_l2_error(
    actual: &[Complex64],
    expected: &[Complex64],
) -> Result<f64, CompareError> {
    if actual.len() != expected.len() {
        return Err(CompareError::MismatchedLengths {
            actual: actual.len(),
            expected: expected.len(),
        });
    }
    let mut diff = 0.0;
    let mut reference = 0.0;
    for (a, b) in actual.iter().zip(expected) {
        diff += (*a - *b).norm_sqr();
        reference += b.norm_sqr();
    }
    if reference == 0.0 {
        return Ok(if diff == 0.0 { 0.0 } else { f64::INFINITY });
    }
    Ok(libm::sqrt(diff) / libm::sqrt(reference))
}

/// Largest acceptable [`relative_l2_error`] for a length-`n` transform.
///
/// `ln 1 = 0`, so lengths below two use the base epsilon.
pub fn tolerance(n: usize) -> f64 {
    if n < 2 {
        base_epsilon()
    } else {
        base_epsilon() * libm::sqrt(libm::log(n as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sequences_have_zero_error() {
        let x = [Complex64::new(1.0, 2.0), Complex64::new(-3.0, 0.5)];
        assert_eq!(relative_l2_error(&x, &x).unwrap(), 0.0);
    }

    #[test]
    fn error_is_relative_to_reference_norm() {
        let expected = [Complex64::new(3.0, 4.0)];
        let actual = [Complex64::new(3.0, 4.5)];
        let err = relative_l2_error(&actual, &expected).unwrap();
        assert!((err - 0.1).abs() < 1e-15);
    }

    #[test]
    fn zero_reference() {
        let zero = [Complex64::zero(); 4];
        assert_eq!(relative_l2_error(&zero, &zero).unwrap(), 0.0);
        let off = [Complex64::new(1e-3, 0.0); 4];
        assert_eq!(relative_l2_error(&off, &zero).unwrap(), f64::INFINITY);
    }

    #[test]
    fn length_mismatch() {
        let err = relative_l2_error(&[Complex64::zero()], &[]).unwrap_err();
        assert_eq!(
            err,
            CompareError::MismatchedLengths {
                actual: 1,
                expected: 0
            }
        );
    }

    #[test]
    fn tolerance_grows_with_length() {
        assert_eq!(tolerance(0), base_epsilon());
        assert_eq!(tolerance(1), base_epsilon());
        assert!(tolerance(1024) > tolerance(16));
        assert!((base_epsilon() - 2.818382931264454e-16).abs() < 1e-28);
    }
}
