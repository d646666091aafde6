//! Year-stratified random sampling of corpus files

use crate::{corpus::Corpus, FileName, Year};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

/// Sampled corpus files, in sampling order
pub type Selection = Vec<SampledFile>;

/// A file picked by the sampler
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SampledFile {
    /// Year folder that the file belongs to
    pub year: Year,

    /// Name of the file within its year folder
    pub file_name: FileName,
}

/// Reasons why sampling can fail
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SampleError {
    #[error("requested sample size {requested} exceeds total available files ({available})")]
    Capacity { requested: usize, available: usize },
}

/// Split a sample size across years of the given sizes
///
/// Every year gets `sample_size / years.len()` files, and the remainder goes
/// one file at a time to the first years. Each quota is then capped by the
/// number of files that the year actually has. Capped quotas are not moved
/// to other years, so the quotas may add up to less than `sample_size`.
pub fn allocate_quotas(sample_size: usize, year_sizes: &[usize]) -> Vec<usize> {
    if year_sizes.is_empty() {
        return Vec::new();
    }
    let per_year = sample_size / year_sizes.len();
    let mut remainder = sample_size % year_sizes.len();
    year_sizes
        .iter()
        .map(|&available| {
            let quota = if remainder > 0 {
                remainder -= 1;
                per_year + 1
            } else {
                per_year
            };
            quota.min(available)
        })
        .collect()
}

/// Pick `sample_size` files from the corpus, balanced across years
///
/// Files are drawn uniformly at random without replacement within each year,
/// following [`allocate_quotas`]. Fails if the corpus does not have enough
/// files overall.
pub fn sample_files(
    corpus: &Corpus,
    sample_size: usize,
    rng: &mut impl Rng,
) -> Result<Selection, SampleError> {
    let available = corpus.total_files();
    if sample_size > available {
        return Err(SampleError::Capacity {
            requested: sample_size,
            available,
        });
    }

    let year_sizes = corpus
        .years()
        .iter()
        .map(|year| year.files.len())
        .collect::<Vec<_>>();
    let quotas = allocate_quotas(sample_size, &year_sizes);

    let mut selection = Selection::with_capacity(sample_size);
    for (year, quota) in corpus.years().iter().zip(quotas) {
        log::debug!("Sampling {quota} of {} files from year {}", year.files.len(), year.year);
        selection.extend(
            year.files
                .choose_multiple(&mut *rng, quota)
                .map(|file_name| SampledFile {
                    year: year.year.clone(),
                    file_name: file_name.clone(),
                }),
        );
    }

    if selection.len() < sample_size {
        log::warn!(
            "Only sampled {} files out of {sample_size} requested, as some years have fewer files than their quota",
            selection.len()
        );
    }
    Ok(selection)
}
