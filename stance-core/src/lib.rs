//! Cleaning pipeline for stance-detection tweet datasets.
//!
//! The flow is loader → batch driver → cleaner:
//!
//! - [`dataset`] reads a CSV of (text, label, target, seen) rows and maps the
//!   textual stance labels to [`Label`]s.
//! - [`analyzer`] turns one raw string into token groups: URLs and emoticons
//!   are stripped, the rest is split into words, punctuation and numbers,
//!   lowercased, and looked up in a [`NormalizationTable`].
//! - [`pipeline`] runs the cleaner over every text and target of a dataset
//!   and reports length statistics.
//!
//! ```
//! use stance_core::{data_clean, NormalizationTable};
//!
//! let table = NormalizationTable::from_pairs([("u", "you")]).unwrap();
//! let tokens = data_clean("U rock tonight! http://t.co/abc", &table);
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[0].as_slice(), ["you"]);
//! ```
//!
//! Logging goes through `tracing`; the library never installs a subscriber.

#![warn(missing_docs)]

pub mod analyzer;
pub mod dataset;
pub mod pipeline;

mod error;
#[cfg(test)]
mod testutil;

pub use analyzer::{data_clean, Cleaner, NormalizationTable};
pub use dataset::{load_data, ColumnLayout, Loader, LoaderConfig, Split};
pub use error::{Error, Result};
pub use pipeline::{clean_all, clean_all_with, clean_dataset, BatchConfig, CleanedCorpus};
pub use stance_types::{CorpusStats, Label, Record, Stance, TokenGroup, TokenSequence};
