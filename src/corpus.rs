//! Year-partitioned contract corpus on disk
//!
//! The corpus root contains one subdirectory per year, named after the year
//! (e.g. `2019`), each holding the plain-text contracts of that year.

use crate::{
    progress::{ProgressConfig, ProgressReport, Work},
    FileName, Result, Year,
};
use anyhow::Context;
use std::{fs, path::Path};

/// Extension of the contract files we care about
pub const TEXT_EXTENSION: &str = ".txt";

/// Text files available in the corpus, grouped by year
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Corpus {
    /// Year folders, in enumeration order, none of them empty
    years: Vec<YearFiles>,
}
//
impl Corpus {
    /// Enumerate the year folders of a corpus root and the text files inside
    ///
    /// Year folders are enumerated by increasing name and files within a year
    /// by increasing file name, so that the result does not depend on the
    /// order in which the filesystem lists directory entries. Year folders
    /// without any text file are left out. Symbolic links are followed.
    pub fn scan(root: &Path, report: &ProgressReport) -> Result<Self> {
        // Find the year folders
        let mut year_dirs = Vec::new();
        let context = || format!("listing corpus root {}", root.display());
        for entry in fs::read_dir(root).with_context(context)? {
            let entry = entry.with_context(context)?;
            let Some(name) = utf8_file_name(&entry) else {
                continue;
            };
            if is_year_name(&name) && entry.path().is_dir() {
                year_dirs.push(name);
            } else {
                log::trace!("Ignored non-year corpus root entry {name:?}");
            }
        }
        year_dirs.sort_unstable();

        // Collect the text files of each year
        let scanning = report.add(
            "Collecting files",
            ProgressConfig::new(Work::Steps(year_dirs.len())).dont_show_rate_eta(),
        );
        let mut years = Vec::with_capacity(year_dirs.len());
        for year in year_dirs {
            let files = list_text_files(&root.join(&*year))?;
            scanning.make_progress(1);
            if files.is_empty() {
                log::debug!("Skipped year {year} which has no text files");
                continue;
            }
            log::debug!("Found {} text files for year {year}", files.len());
            years.push(YearFiles { year, files });
        }
        Ok(Self { years })
    }

    /// Build a corpus from an explicit listing
    ///
    /// Empty years are dropped, as they would be when scanning a directory.
    /// The enumeration order of years and files is kept as-is.
    pub fn from_listing(
        listing: impl IntoIterator<Item = (Year, Vec<FileName>)>,
    ) -> Self {
        let years = listing
            .into_iter()
            .filter(|(_year, files)| !files.is_empty())
            .map(|(year, files)| YearFiles { year, files })
            .collect();
        Self { years }
    }

    /// Year folders in enumeration order
    pub fn years(&self) -> &[YearFiles] {
        &self.years
    }

    /// Number of text files available across all years
    pub fn total_files(&self) -> usize {
        self.years.iter().map(|year| year.files.len()).sum()
    }
}

/// Text files from a single year folder
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YearFiles {
    /// Name of the year folder
    pub year: Year,

    /// Names of the text files inside, in enumeration order
    pub files: Vec<FileName>,
}

/// Truth that a directory name designates a year folder
pub fn is_year_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// List the text files of a year folder, sorted by name
fn list_text_files(year_dir: &Path) -> Result<Vec<FileName>> {
    let context = || format!("listing year folder {}", year_dir.display());
    let mut files = Vec::new();
    for entry in fs::read_dir(year_dir).with_context(context)? {
        let entry = entry.with_context(context)?;
        let Some(name) = utf8_file_name(&entry) else {
            continue;
        };
        if name.ends_with(TEXT_EXTENSION) && entry.path().is_file() {
            files.push(name);
        }
    }
    files.sort_unstable();
    Ok(files)
}

/// Name of a directory entry, if it is valid UTF-8
fn utf8_file_name(entry: &fs::DirEntry) -> Option<Box<str>> {
    match entry.file_name().into_string() {
        Ok(name) => Some(name.into()),
        Err(name) => {
            log::warn!("Skipped corpus entry with non-UTF-8 name {name:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::write(path, "contract").unwrap();
    }

    #[test]
    fn year_names_are_all_digits() {
        assert!(is_year_name("2019"));
        assert!(is_year_name("1"));
        assert!(!is_year_name(""));
        assert!(!is_year_name("20x9"));
        assert!(!is_year_name("-2019"));
        assert!(!is_year_name("２０１９"));
    }

    #[test]
    fn scan_keeps_text_files_in_year_folders() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("2020")).unwrap();
        fs::create_dir(root.join("2019")).unwrap();
        fs::create_dir(root.join("misc")).unwrap();
        fs::create_dir(root.join("2021")).unwrap();
        touch(&root.join("2020/b.txt"));
        touch(&root.join("2020/a.txt"));
        touch(&root.join("2020/notes.md"));
        touch(&root.join("2019/c.txt"));
        touch(&root.join("2019/e.TXT"));
        touch(&root.join("misc/d.txt"));
        touch(&root.join("1999"));
        fs::create_dir(root.join("2021/nested.txt")).unwrap();

        let corpus = Corpus::scan(root, &ProgressReport::hidden()).unwrap();
        let expected = Corpus::from_listing([
            ("2019".into(), vec!["c.txt".into()]),
            ("2020".into(), vec!["a.txt".into(), "b.txt".into()]),
        ]);
        assert_eq!(corpus, expected);
        assert_eq!(corpus.total_files(), 3);
    }

    #[test]
    fn scan_of_missing_root_fails() {
        let dir = tempdir().unwrap();
        let err = Corpus::scan(&dir.path().join("absent"), &ProgressReport::hidden()).unwrap_err();
        assert!(format!("{err:#}").contains("listing corpus root"));
    }

    #[test]
    fn listing_drops_empty_years() {
        let corpus = Corpus::from_listing([
            ("2018".into(), vec![]),
            ("2019".into(), vec!["a.txt".into()]),
        ]);
        assert_eq!(corpus.years().len(), 1);
        assert_eq!(&*corpus.years()[0].year, "2019");
    }

    #[cfg(unix)]
    #[test]
    fn scan_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path().join("corpus");
        let elsewhere = dir.path().join("elsewhere");
        fs::create_dir_all(root.join("2019")).unwrap();
        fs::create_dir_all(elsewhere.join("archive")).unwrap();
        touch(&elsewhere.join("original.txt"));
        touch(&elsewhere.join("archive/real.txt"));
        symlink(elsewhere.join("original.txt"), root.join("2019/link.txt")).unwrap();
        symlink(elsewhere.join("archive"), root.join("2020")).unwrap();
        symlink(elsewhere.join("missing.txt"), root.join("2019/dangling.txt")).unwrap();

        let corpus = Corpus::scan(&root, &ProgressReport::hidden()).unwrap();
        let expected = Corpus::from_listing([
            ("2019".into(), vec!["link.txt".into()]),
            ("2020".into(), vec!["real.txt".into()]),
        ]);
        assert_eq!(corpus, expected);
        assert_eq!(corpus.total_files(), 2);
    }
}
