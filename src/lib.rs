//! # dftref - Reference fixtures for DFT validation
//!
//! Generates input/output pairs that a discrete Fourier transform under test
//! is checked against. Everything is deterministic: the same seed and the
//! same sequence of case sizes produce byte-identical files on every
//! platform with IEEE-754 doubles.
//!
//! ## Pipeline
//!
//! - **[`sampler`]**: uniform values in `[0, 1)` built from several 32-bit
//!   draws, carrying about 106 random bits in [`Wide`] precision
//! - **[`sequence`]**: complex signals with components in `[-0.5, 0.5)`
//! - **[`dft`]**: direct `O(n²)` forward DFT, unnormalized, used as the oracle
//! - **[`fixture`]**: flat little-endian `f64` dumps, `16 * n` bytes each,
//!   named `fftw.{n}.in` / `fftw.{n}.out`
//! - **[`driver`]**: reads case sizes and writes one fixture pair per size
//!
//! [`compare`] holds the accuracy metric a DFT under test must meet against
//! the fixtures.
//!
//! ## Precision
//!
//! Sampling and the transform run in a working precision chosen through
//! [`Float`]. The default, [`Wide`], is a double-double built only from
//! correctly rounded binary64 operations, so it is reproducible everywhere.
//! Values are narrowed to `f64` once, when they are serialized.
//!
//! ## Example
//!
//! ```no_run
//! use dftref::{Config, Driver};
//!
//! let config = Config::from_env();
//! let mut driver = Driver::from_config(&config);
//! let report = driver.run_case(64).unwrap();
//! println!("{} {}", report.input.path.display(), report.output.digest.to_hex());
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

/// Working-precision float trait and complex type.
pub mod num;
mod wide;

/// Extended-precision uniform sampler.
pub mod sampler;

/// Reproducible complex test signals.
pub mod sequence;

/// Reference discrete Fourier transform.
pub mod dft;

/// Binary artifact encoding and file I/O.
pub mod fixture;

/// Accuracy metric for DFTs under test.
pub mod compare;

/// Seed and output directory, with environment overrides.
pub mod config;

/// Case-size input and the batch loop.
pub mod driver;

pub use config::{Config, DEFAULT_SEED};
pub use driver::{CasePreset, CaseReport, CaseSizes, Driver};
pub use fixture::{FixtureArtifact, FixtureError, FixturePair, Role};
pub use num::{Complex, Complex64, ComplexWide, Float, Wide};
pub use sampler::ExtendedPrecisionSampler;
pub use sequence::SequenceGenerator;
