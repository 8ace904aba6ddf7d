//! Run configuration.
//!
//! The seed is the only setting that affects generated content. Defaults can
//! be overridden through `DFTREF_SEED` and `DFTREF_OUTPUT_DIR`; unparsable
//! values fall back to the default. Command-line flags take priority over
//! both and are applied by the binary.

use std::path::PathBuf;

/// Seed used when nothing overrides it.
pub const DEFAULT_SEED: u64 = 1_415_926_535;

pub const SEED_ENV: &str = "DFTREF_SEED";
pub const OUTPUT_DIR_ENV: &str = "DFTREF_OUTPUT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u64,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`] but reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let seed = lookup(SEED_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(defaults.seed);
        let output_dir = lookup(OUTPUT_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        Self { seed, output_dir }
    }
}
