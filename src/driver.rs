//! Batch orchestration: case sizes in, fixture pairs out.

use std::collections::VecDeque;
use std::io::BufRead;
use std::path::PathBuf;

use log::{info, warn};
use rand::RngCore;
use rand_chacha::ChaCha8Rng;

use crate::config::Config;
use crate::dft;
use crate::fixture::{self, FixtureArtifact, FixtureError, Role};
use crate::num::{Float, Wide};
use crate::sequence::SequenceGenerator;

/// Powers of two from 2^0 to 2^17.
pub const POW2_LENGTHS: [usize; 18] = [
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768, 65536, 131072,
];

/// Primes, prime powers and mixed-radix products.
pub const MIXED_LENGTHS: [usize; 39] = [
    3, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15, 20, 21, 22, 24, 26, 28, 33, 35, 39, 44, 49, 52, 55, 65,
    77, 91, 97, 108, 120, 121, 143, 169, 194, 840, 997, 9240, 9973, 120120,
];

/// Built-in case lists.
///
/// The largest sizes take hours with the `O(n²)` double-double oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePreset {
    /// [`POW2_LENGTHS`].
    Pow2,
    /// [`MIXED_LENGTHS`].
    Mixed,
    /// Both lists, powers of two first.
    All,
}

impl CasePreset {
    /// Case sizes in generation order.
    pub fn sizes(self) -> Vec<usize> {
        match self {
            CasePreset::Pow2 => POW2_LENGTHS.to_vec(),
            CasePreset::Mixed => MIXED_LENGTHS.to_vec(),
            CasePreset::All => POW2_LENGTHS.iter().chain(&MIXED_LENGTHS).copied().collect(),
        }
    }
}

/// Case sizes read lazily from whitespace-separated text.
///
/// Iteration ends at end of input, at the first token that is not a
/// non-negative integer, or at a read error. None of these is an error for
/// the batch.
pub struct CaseSizes<B> {
    input: B,
    pending: VecDeque<String>,
    done: bool,
}

impl<B: BufRead> CaseSizes<B> {
    pub fn new(input: B) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<B: BufRead> Iterator for CaseSizes<B> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while !self.done {
            if let Some(token) = self.pending.pop_front() {
                match token.parse::<usize>() {
                    Ok(n) => return Some(n),
                    Err(_) => {
                        warn!("stopping at malformed case size {token:?}");
                        self.done = true;
                    }
                }
                continue;
            }
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => self.done = true,
                Ok(_) => self
                    .pending
                    .extend(line.split_whitespace().map(str::to_owned)),
                Err(err) => {
                    warn!("stopping at unreadable input: {err}");
                    self.done = true;
                }
            }
        }
        None
    }
}

/// What one case produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub n: usize,
    pub input: FixtureArtifact,
    pub output: FixtureArtifact,
}

/// Runs cases in order against one shared generator.
///
/// Cases are not independent: each consumes draws from the generator, so a
/// case's input depends on every size requested before it.
pub struct Driver<T: Float = Wide, R: RngCore = ChaCha8Rng> {
    generator: SequenceGenerator<T, R>,
    output_dir: PathBuf,
}

impl Driver<Wide, ChaCha8Rng> {
    /// Driver seeded with `config.seed`, writing into `config.output_dir`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SequenceGenerator::seeded(config.seed),
            config.output_dir.clone(),
        )
    }
}

impl<T: Float, R: RngCore> Driver<T, R> {
    /// Driver writing into `output_dir`, which must already exist.
    pub fn new(generator: SequenceGenerator<T, R>, output_dir: PathBuf) -> Self {
        Self {
            generator,
            output_dir,
        }
    }

    /// Generate, transform and write both artifacts for one length.
    pub fn run_case(&mut self, n: usize) -> Result<CaseReport, FixtureError> {
        info!("n = {n}");
        let input = self.generator.generate(n);
        let output = dft::transform(&input);
        let input = fixture::write_artifact(&self.output_dir, Role::Input, &input)?;
        let output = fixture::write_artifact(&self.output_dir, Role::Output, &output)?;
        Ok(CaseReport { n, input, output })
    }

    /// Run every size in `sizes`, stopping at the first failed write.
    pub fn run_sizes<I>(&mut self, sizes: I) -> Result<Vec<CaseReport>, FixtureError>
    where
        I: IntoIterator<Item = usize>,
    {
        sizes.into_iter().map(|n| self.run_case(n)).collect()
    }

    /// Run the sizes read from `input` until it ends.
    pub fn run<B: BufRead>(&mut self, input: B) -> Result<Vec<CaseReport>, FixtureError> {
        self.run_sizes(CaseSizes::new(input))
    }
}
