//! Extended-precision uniform sampler.
//!
//! One native draw yields 32 random bits. [`ExtendedPrecisionSampler::sample`]
//! stacks draws as successive base-2^32 digits of a fraction in `[0, 1)` until
//! the next digit position falls below the resolution of the working type,
//! so a [`Wide`](crate::num::Wide) sample carries about 106 random bits.

use core::marker::PhantomData;

use log::trace;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::num::Float;

/// Bits contributed by one native draw (`RngCore::next_u32`).
pub const NATIVE_BITS: u32 = 32;

/// `1 / 2^NATIVE_BITS`, the weight of the first digit.
const DIGIT_WEIGHT: f64 = 1.0 / (1u64 << NATIVE_BITS) as f64;

/// Uniform sampler over `[0, 1)` in working precision `T`.
///
/// The output is a pure function of the seed and the number of prior calls.
/// The default generator, [`ChaCha8Rng`], has a documented value-stable
/// stream, so samples are reproducible across platforms and releases.
///
/// # Concurrency
/// Every call advances the generator through `&mut self`. A sampler must not
/// be shared between threads; the output would then depend on scheduling.
pub struct ExtendedPrecisionSampler<T: Float, R: RngCore = ChaCha8Rng> {
    rng: R,
    draws: u64,
    _precision: PhantomData<T>,
}

impl<T: Float> ExtendedPrecisionSampler<T, ChaCha8Rng> {
    /// Seed the default generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<T: Float, R: RngCore> ExtendedPrecisionSampler<T, R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            draws: 0,
            _precision: PhantomData,
        }
    }

    /// Native draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Draw a value in `[0, 1)`.
    ///
    /// The digit weight is an exact power of two that shrinks by `2^-32` per
    /// draw. Once adding one more unit at that weight no longer changes the
    /// accumulator, the value has converged. The weight underflows to zero
    /// instead of growing without bound, so even an all-zero stream stops
    /// within the exponent range of `T` (34 draws for `f64`-based types).
    pub fn sample(&mut self) -> T {
        let step = T::from_f64(DIGIT_WEIGHT);
        let mut unit = step;
        let mut acc = T::zero();
        let mut digits = 0u32;
        loop {
            let digit = T::from_f64(f64::from(self.rng.next_u32()));
            self.draws += 1;
            digits += 1;
            acc = acc + digit * unit;
            if acc + unit == acc {
                break;
            }
            unit = unit * step;
        }
        trace!("sample converged after {digits} digits");
        // Rounding in a narrow working type can carry the sum up to one.
        if acc >= T::one() {
            T::from_f64(1.0 - f64::EPSILON / 2.0)
        } else {
            acc
        }
    }
}

/// Generator returning the same word forever.
#[cfg(test)]
pub(crate) struct ConstRng(pub u32);

#[cfg(test)]
impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        self.0
    }
    fn next_u64(&mut self) -> u64 {
        (u64::from(self.0) << 32) | u64::from(self.0)
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let word = self.0.to_le_bytes();
        for chunk in dest.chunks_mut(4) {
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
