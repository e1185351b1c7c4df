//! Batch driver: load a dataset file and clean every text and target.

use std::path::Path;

use rayon::prelude::*;
use stance_types::{CorpusStats, Label, Record, TokenSequence};

use crate::analyzer::{Cleaner, NormalizationTable};
use crate::dataset::{Loader, LoaderConfig};
use crate::error::Result;

/// Batch options.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchConfig {
    /// How the dataset file is read.
    pub loader: LoaderConfig,
    /// Clean records on the rayon pool. Output order is unchanged.
    pub parallel: bool,
}

/// Cleaned dataset. `texts`, `labels` and `targets` are index-aligned with
/// the loaded records.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedCorpus {
    /// Cleaned tweet texts.
    pub texts: Vec<TokenSequence>,
    /// Mapped labels.
    pub labels: Vec<Label>,
    /// Cleaned targets.
    pub targets: Vec<TokenSequence>,
    /// Length statistics over `texts`.
    pub stats: CorpusStats,
}

impl CleanedCorpus {
    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the corpus has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Indices of samples whose label fell outside the canonical set.
    pub fn unknown_labels(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(i, label)| label.is_unknown().then_some(i))
            .collect()
    }
}

/// Loads `path` with default options and cleans every record against `table`.
///
/// Reports the mean cleaned text length and the sample count through
/// `tracing` at info level.
///
/// # Errors
///
/// Propagates loader failures; cleaning itself cannot fail.
pub fn clean_all(path: impl AsRef<Path>, table: &NormalizationTable) -> Result<CleanedCorpus> {
    clean_all_with(path, table, &BatchConfig::default())
}

/// [`clean_all`] with explicit options.
pub fn clean_all_with(
    path: impl AsRef<Path>,
    table: &NormalizationTable,
    config: &BatchConfig,
) -> Result<CleanedCorpus> {
    let records = Loader::new(config.loader).load(path)?;
    Ok(clean_dataset(&records, table, config))
}

/// Cleans already-loaded records. Text and target of each record are cleaned
/// independently.
pub fn clean_dataset(
    records: &[Record],
    table: &NormalizationTable,
    config: &BatchConfig,
) -> CleanedCorpus {
    let (texts, targets): (Vec<TokenSequence>, Vec<TokenSequence>) = if config.parallel {
        records
            .par_iter()
            .map_init(
                || Cleaner::new(table),
                |cleaner, record| (cleaner.clean(&record.text), cleaner.clean(&record.target)),
            )
            .unzip()
    } else {
        let mut cleaner = Cleaner::new(table);
        records
            .iter()
            .map(|record| (cleaner.clean(&record.text), cleaner.clean(&record.target)))
            .unzip()
    };

    let labels = records.iter().map(|record| record.label.clone()).collect();
    let stats = CorpusStats::from_lengths(texts.iter().map(Vec::len));
    report(&stats);

    CleanedCorpus {
        texts,
        labels,
        targets,
        stats,
    }
}

fn report(stats: &CorpusStats) {
    match stats.mean_groups {
        Some(mean) => tracing::info!(mean, "average tweet length"),
        None => tracing::info!("average tweet length: n/a (no samples)"),
    }
    tracing::info!(samples = stats.num_samples, "number of samples");
}
