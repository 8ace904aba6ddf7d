use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use dftref::{CasePreset, CaseSizes, Config, Driver};
use log::LevelFilter;
use std::io::{self, Write};
use std::path::PathBuf;

/// Write reference DFT fixture pairs (`fftw.{n}.in`, `fftw.{n}.out`) for
/// each case size read from stdin.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Directory the artifacts are written to (created if missing)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Seed for the sample generator
    #[arg(long)]
    seed: Option<u64>,

    /// Use a built-in list of case sizes instead of reading stdin
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Preset {
    Pow2,
    Mixed,
    All,
}

impl From<Preset> for CasePreset {
    fn from(p: Preset) -> Self {
        match p {
            Preset::Pow2 => CasePreset::Pow2,
            Preset::Mixed => CasePreset::Mixed,
            Preset::All => CasePreset::All,
        }
    }
}

fn log_level(args: &Args) -> LevelFilter {
    if args.quiet {
        return LevelFilter::Warn;
    }
    match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    // RUST_LOG, when set, wins over the flags.
    env_logger::builder()
        .filter_level(log_level(&args))
        .parse_default_env()
        .init();

    let mut config = Config::from_env();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "cannot create output directory {}",
            config.output_dir.display()
        )
    })?;

    let sizes: Box<dyn Iterator<Item = usize>> = match args.preset {
        Some(preset) => Box::new(CasePreset::from(preset).sizes().into_iter()),
        None => Box::new(CaseSizes::new(io::stdin().lock())),
    };

    let mut driver = Driver::from_config(&config);
    let mut stdout = io::stdout().lock();
    for n in sizes {
        let report = driver
            .run_case(n)
            .with_context(|| format!("case n = {n} failed"))?;
        writeln!(stdout, "n = {}", report.n)?;
    }
    Ok(())
}
