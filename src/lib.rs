//! Year-stratified sampling of contract text files into JSON corpora
//!
//! The corpus is a directory with one subdirectory per year, each holding
//! plain-text contracts. A sampling run picks a balanced number of contracts
//! from every year, normalizes their text, and writes them out as a JSON
//! array of `{id, text}` records ready for language model tagging.

pub mod config;
pub mod corpus;
pub mod extract;
pub mod locate;
pub mod pipeline;
pub mod progress;
pub mod sampler;

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Name of a year folder of the corpus, e.g. "2019"
///
/// Kept as a string because it is copied verbatim into record identifiers.
pub type Year = Box<str>;

/// Name of a contract file within its year folder
pub type FileName = Box<str>;
