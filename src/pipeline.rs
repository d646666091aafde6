//! End-to-end sampling run: scan, sample, extract, write

use crate::{
    config::Config,
    corpus::Corpus,
    extract::{self, Record},
    progress::ProgressReport,
    sampler, Result,
};
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Outcome of a sampling run
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RunSummary {
    /// Where the records were written
    pub output_path: PathBuf,

    /// Number of records that were requested
    pub requested: usize,

    /// Number of records that were written
    pub written: usize,
}

/// Sample contracts from the corpus and write the processed records to disk
///
/// Nothing is written if the corpus can't supply the requested sample size.
pub fn run(config: &Config, report: &ProgressReport) -> Result<RunSummary> {
    log::debug!("Starting sampling run with {config:?}");

    let corpus = Corpus::scan(&config.root_path, report)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let selection = sampler::sample_files(&corpus, config.sample_size, &mut rng)
        .with_context(|| format!("sampling contracts from {}", config.root_path.display()))?;

    let records = extract::extract_records(
        &config.root_path,
        &selection,
        &config.extract_options(),
        report,
    )?;
    write_records(&config.output_path, &records)?;
    log::info!(
        "Wrote {} records to {}",
        records.len(),
        config.output_path.display()
    );

    Ok(RunSummary {
        output_path: config.output_path.clone(),
        requested: config.sample_size,
        written: records.len(),
    })
}

/// Write records as an indented JSON array
///
/// Non-ASCII characters are written as-is rather than escaped.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let context = || format!("writing records to {}", path.display());
    let mut output = BufWriter::new(File::create(path).with_context(context)?);
    serde_json::to_writer_pretty(&mut output, records).with_context(context)?;
    output.flush().with_context(context)?;
    Ok(())
}
