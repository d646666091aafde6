//! Lookup of the dataset directory from somewhere inside the project tree

use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

/// Name of the dataset directory that is looked up by default
pub const DEFAULT_TARGET: &str = "Datasets";

/// Number of directories that are searched, starting directory included
pub const SEARCH_LEVELS: usize = 4;

/// Reasons why the dataset directory can't be located
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("could not find the {target} directory in the {levels} closest directories up from {}, please run from the correct location", .start.display())]
    NotFound {
        target: Box<str>,
        start: PathBuf,
        levels: usize,
    },

    #[error("{target:?} is not a plain directory name")]
    InvalidTarget { target: Box<str> },

    #[error("could not resolve the starting directory {}", .start.display())]
    StartDir {
        start: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine the current directory")]
    CurrentDir(#[source] std::io::Error),
}

/// Find a `target` directory in `start` or one of its closest ancestors
///
/// `start` is resolved into an absolute path first, so that relative starts
/// like `.` or `..` walk up the real parent directories. Looks into `start`
/// and up to `SEARCH_LEVELS - 1` of its parents, stopping at the filesystem
/// root, and returns the path to the first `target` subdirectory found.
pub fn locate(target: &str, start: &Path) -> Result<PathBuf, LocateError> {
    if !is_plain_name(target) {
        return Err(LocateError::InvalidTarget {
            target: target.into(),
        });
    }
    let start = fs::canonicalize(start).map_err(|source| LocateError::StartDir {
        start: start.to_owned(),
        source,
    })?;
    for dir in start.ancestors().take(SEARCH_LEVELS) {
        let candidate = dir.join(target);
        if candidate.is_dir() {
            log::debug!("Found {target} directory at {}", candidate.display());
            return Ok(candidate);
        }
        log::trace!("No {target} directory in {}", dir.display());
    }
    Err(LocateError::NotFound {
        target: target.into(),
        start,
        levels: SEARCH_LEVELS,
    })
}

/// Find a `target` directory in the current directory or its closest ancestors
pub fn locate_from_cwd(target: &str) -> Result<PathBuf, LocateError> {
    let cwd = std::env::current_dir().map_err(LocateError::CurrentDir)?;
    locate(target, &cwd)
}

/// Truth that a name designates an entry of a directory, and nothing else
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first == name
    )
}
