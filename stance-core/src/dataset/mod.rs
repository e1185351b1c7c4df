//! Dataset ingestion.
//!
//! Turns a delimited file into an ordered list of [`Record`]s. Row order is
//! preserved so downstream outputs stay index-aligned with the file.
//!
//! [`Record`]: stance_types::Record

pub mod loader;

pub use loader::{load_data, ColumnLayout, Loader, LoaderConfig, Split};
