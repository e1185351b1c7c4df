//! Text cleaning pipeline.
//!
//! This module provides the per-string cleaning components:
//! - **Strip**: Removes URLs and emoticons from raw tweet text
//! - **Tokenizer**: Splits stripped text into word, punctuation and number tokens
//! - **Normalizer**: Slang/abbreviation table applied to lowercased tokens
//! - **Cleaner**: Runs all stages in order and builds the token groups

pub mod cleaner;
pub mod normalizer;
pub mod strip;
pub mod tokenizer;

pub use cleaner::{data_clean, Cleaner};
pub use normalizer::NormalizationTable;
pub use tokenizer::{TokenClass, Tokenizer};
