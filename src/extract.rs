//! Text extraction from sampled contract files

use crate::{
    progress::{ProgressConfig, ProgressReport, Work},
    sampler::SampledFile,
    Result,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, num::NonZeroUsize, path::Path};

/// Default token budget when only the head of each contract is kept
pub const DEFAULT_HEAD_TOKENS: NonZeroUsize = match NonZeroUsize::new(512) {
    Some(n) => n,
    None => unreachable!(),
};

/// Default prefix of record identifiers
pub const DEFAULT_ID_PREFIX: &str = "cuad";

/// Processed contract, as written to the output file
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Record {
    /// Identifier derived from the year and file name
    pub id: String,

    /// Normalized contract text
    pub text: String,
}

/// How sampled files are turned into records
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ExtractOptions {
    /// Prefix of record identifiers
    pub id_prefix: Box<str>,

    /// Only keep this many leading tokens of each contract, if set
    pub truncation_tokens: Option<NonZeroUsize>,
}
//
impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.into(),
            truncation_tokens: Some(DEFAULT_HEAD_TOKENS),
        }
    }
}

/// Read sampled files one after another and turn them into records
///
/// Records come out in the same order as the input selection.
pub fn extract_records(
    root: &Path,
    selection: &[SampledFile],
    options: &ExtractOptions,
    report: &ProgressReport,
) -> Result<Vec<Record>> {
    let processing = report.add(
        "Processing files",
        ProgressConfig::new(Work::Steps(selection.len())),
    );
    let mut records = Vec::with_capacity(selection.len());
    for file in selection {
        let path = root.join(&*file.year).join(&*file.file_name);
        let content =
            read_lossy(&path).with_context(|| format!("reading contract {}", path.display()))?;
        let mut text = normalize(&content);
        if let Some(limit) = options.truncation_tokens {
            text = truncate_tokens(&text, limit.get());
        }
        log::trace!("Extracted {} bytes of text from {}", text.len(), path.display());
        records.push(Record {
            id: record_id(&options.id_prefix, &file.year, &file.file_name),
            text,
        });
        processing.make_progress(1);
    }
    Ok(records)
}

/// Identifier of the record extracted from a file
///
/// This is the prefix, followed by the year, followed by the file name with
/// its last extension removed. Leading dots do not start an extension.
pub fn record_id(prefix: &str, year: &str, file_name: &str) -> String {
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
    let stem = match file_name[leading_dots..].rfind('.') {
        Some(dot) => &file_name[..leading_dots + dot],
        None => file_name,
    };
    format!("{prefix}{year}{stem}")
}

/// Remove blank lines and join the remaining ones with single spaces
///
/// Lines are not trimmed: only the line breaks are replaced.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for line in text.split(is_line_break).filter(|line| !line.chars().all(is_space)) {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(line);
    }
    normalized
}

/// Keep the first `limit` whitespace-separated tokens, joined by single spaces
pub fn truncate_tokens(text: &str, limit: usize) -> String {
    text.split(is_space)
        .filter(|token| !token.is_empty())
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read a text file, dropping byte sequences that are not valid UTF-8
pub fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_ignoring_errors(&bytes))
}

/// Decode UTF-8, skipping over invalid byte sequences
fn decode_ignoring_errors(mut bytes: &[u8]) -> String {
    let mut decoded = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                decoded.push_str(valid);
                return decoded;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                decoded.push_str(
                    std::str::from_utf8(valid).expect("prefix was checked to be valid UTF-8"),
                );
                let Some(invalid_len) = e.error_len() else {
                    // Truncated sequence at the end of the input
                    return decoded;
                };
                bytes = &rest[invalid_len..];
            }
        }
    }
}

/// Truth that a character separates tokens
///
/// Unicode whitespace plus the ASCII information separators.
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Truth that a character ends a line
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
