//! Sampling pipeline configuration

use crate::extract::{ExtractOptions, DEFAULT_HEAD_TOKENS, DEFAULT_ID_PREFIX};
use serde::{Deserialize, Serialize};
use std::{num::NonZeroUsize, path::PathBuf};

/// Default location of the contract corpus
pub const DEFAULT_ROOT: &str = "./contracts";

/// Default location of the JSON output
pub const DEFAULT_OUTPUT: &str = "heads_1.json";

/// Default number of contracts to sample
pub const DEFAULT_SAMPLE_SIZE: usize = 5000;

/// Default random seed
pub const DEFAULT_SEED: u64 = 2;

/// Final process configuration
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Config {
    /// Corpus root, with one subdirectory per year
    pub root_path: PathBuf,

    /// Where the JSON array of records is written
    pub output_path: PathBuf,

    /// Number of contracts to sample
    pub sample_size: usize,

    /// Seed of the random number generator used for sampling
    pub seed: u64,

    /// Only keep this many leading tokens of each contract, if set
    pub truncation_tokens: Option<NonZeroUsize>,

    /// Prefix of record identifiers
    pub id_prefix: Box<str>,
}
//
impl Config {
    /// Options of the text extraction step
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            id_prefix: self.id_prefix.clone(),
            truncation_tokens: self.truncation_tokens,
        }
    }
}
//
impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: DEFAULT_ROOT.into(),
            output_path: DEFAULT_OUTPUT.into(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            truncation_tokens: Some(DEFAULT_HEAD_TOKENS),
            id_prefix: DEFAULT_ID_PREFIX.into(),
        }
    }
}
