//! Sample contracts from a year-partitioned corpus (such as the CUAD contract
//! collection) and turn them into a JSON corpus for language model tagging.

use anyhow::Context;
use clap::{Parser, Subcommand};
use contract_sampler::{
    config::{self, Config},
    extract::{DEFAULT_HEAD_TOKENS, DEFAULT_ID_PREFIX},
    locate, pipeline,
    progress::ProgressReport,
    Result,
};
use log::LevelFilter;
use std::{num::NonZeroUsize, path::PathBuf};

/// Contract corpus sampling tool
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Operations supported by this program
#[derive(Subcommand, Debug)]
enum Command {
    /// Sample contracts from the corpus and write them as JSON records
    Sample(SampleArgs),

    /// Print the location of the dataset directory
    ///
    /// The directory is looked up in the starting directory, then in its
    /// closest parents.
    Locate(LocateArgs),
}

/// Arguments of the `sample` operation
#[derive(clap::Args, Debug)]
struct SampleArgs {
    /// Corpus root directory, with one subdirectory per year
    #[arg(short, long, default_value = config::DEFAULT_ROOT)]
    root: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Number of contracts to sample
    ///
    /// Contracts are spread evenly across years, with any leftover going to
    /// the earliest years. A year that has fewer contracts than its share
    /// contributes all of them, and the missing contracts are not picked
    /// from other years.
    #[arg(short = 'n', long, default_value_t = config::DEFAULT_SAMPLE_SIZE.try_into().expect("default sample size is not zero"))]
    sample_size: NonZeroUsize,

    /// Random seed, for reproducible sampling
    #[arg(short, long, default_value_t = config::DEFAULT_SEED)]
    seed: u64,

    /// Number of leading tokens to keep from each contract
    #[arg(long, default_value_t = DEFAULT_HEAD_TOKENS, conflicts_with = "full_text")]
    head_tokens: NonZeroUsize,

    /// Keep the full text of each contract instead of its leading tokens
    #[arg(long, default_value_t = false)]
    full_text: bool,

    /// Prefix of record identifiers
    #[arg(long, default_value = DEFAULT_ID_PREFIX)]
    id_prefix: Box<str>,

    /// Don't display progress bars
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}
//
impl SampleArgs {
    /// Check arguments for basic sanity
    fn check(&self) -> Result<()> {
        anyhow::ensure!(
            self.root.is_dir(),
            "corpus root {} is not a directory",
            self.root.display()
        );
        Ok(())
    }

    /// Turn into the sampling run configuration
    fn into_config(self) -> Config {
        let Self {
            root,
            output,
            sample_size,
            seed,
            head_tokens,
            full_text,
            id_prefix,
            quiet: _,
        } = self;
        Config {
            root_path: root,
            output_path: output,
            sample_size: sample_size.get(),
            seed,
            truncation_tokens: (!full_text).then_some(head_tokens),
            id_prefix,
        }
    }
}

/// Arguments of the `locate` operation
#[derive(clap::Args, Debug)]
struct LocateArgs {
    /// Name of the directory to look for
    #[arg(short, long, default_value = locate::DEFAULT_TARGET)]
    target: Box<str>,

    /// Directory to start from, instead of the current directory
    #[arg(short, long)]
    from: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments
    match Args::parse().command {
        Command::Sample(args) => {
            args.check()?;
            let report = if args.quiet {
                ProgressReport::hidden()
            } else {
                ProgressReport::new()
            };
            let config = args.into_config();
            let summary = pipeline::run(&config, &report)?;
            if summary.written < summary.requested {
                println!(
                    "Only {} of the {} requested contracts could be sampled",
                    summary.written, summary.requested
                );
            }
            println!("Output saved to {}", summary.output_path.display());
        }
        Command::Locate(args) => {
            let found = match &args.from {
                Some(start) => locate::locate(&args.target, start),
                None => locate::locate_from_cwd(&args.target),
            }
            .context("locating the dataset directory")?;
            println!("{}", found.display());
        }
    }
    Ok(())
}

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
