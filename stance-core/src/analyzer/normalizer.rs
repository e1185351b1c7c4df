//! Slang and abbreviation normalization table.
//!
//! Maps a lowercase token to its canonical expansion. Values are split on
//! whitespace once, at insert time, so a lookup during cleaning hands back a
//! ready-made token group (`"idk"` -> `["i", "don't", "know"]`).

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use rustc_hash::FxHashMap;
use stance_types::TokenGroup;

use crate::error::{Error, Result};

/// Immutable-after-build lookup from token to replacement group.
///
/// Shared by reference across every cleaning call (and across rayon workers
/// when batch cleaning runs in parallel).
///
/// # Examples
///
/// ```
/// use stance_core::analyzer::NormalizationTable;
///
/// let table = NormalizationTable::from_pairs([("u", "you"), ("idk", "i do not know")]).unwrap();
/// assert_eq!(table.get("idk").unwrap(), ["i", "do", "not", "know"]);
/// assert!(table.get("hello").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NormalizationTable {
    entries: FxHashMap<Box<str>, TokenGroup>,
}

impl NormalizationTable {
    /// Creates an empty table. Cleaning with it only strips, tokenizes and lowercases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(key, replacement)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyReplacement` if a replacement has no tokens.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::new();
        for (key, value) in pairs {
            table.insert(key.as_ref(), value.as_ref())?;
        }
        Ok(table)
    }

    /// Reads a JSON object of string keys to string replacements.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: FxHashMap<String, String> = serde_json::from_reader(reader)?;
        Self::from_pairs(raw)
    }

    /// Reads `key<TAB>replacement` lines. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns `Error::TableFormat` with the 1-based line number when a
    /// non-blank line has no tab.
    pub fn from_tsv_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once('\t') else {
                return Err(Error::TableFormat {
                    line: idx + 1,
                    reason: "missing tab between key and replacement",
                });
            };
            table.insert(key.trim(), value)?;
        }

        Ok(table)
    }

    /// Loads a table from disk, as JSON when the extension is `.json` and as
    /// tab-separated pairs otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = BufReader::new(file);

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let table = if is_json {
            Self::from_json_reader(reader)?
        } else {
            Self::from_tsv_reader(reader)?
        };

        tracing::debug!(
            path = %path.display(),
            entries = table.len(),
            "loaded normalization table"
        );
        Ok(table)
    }

    /// Inserts one entry. The key is ASCII-lowercased to match cleaned
    /// tokens; an existing entry for the same key is replaced.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyReplacement` if `replacement` is empty or only
    /// whitespace, since it could not form a token group.
    pub fn insert(&mut self, key: &str, replacement: &str) -> Result<()> {
        let group: TokenGroup = replacement.split_whitespace().map(str::to_owned).collect();
        if group.is_empty() {
            return Err(Error::EmptyReplacement {
                key: key.to_owned(),
            });
        }

        self.entries
            .insert(key.to_ascii_lowercase().into_boxed_str(), group);
        Ok(())
    }

    /// Adds every entry of `other`, overwriting keys already present.
    pub fn merge(&mut self, other: NormalizationTable) {
        self.entries.extend(other.entries);
    }

    /// Looks up the replacement group for a cleaned token.
    #[inline]
    pub fn get(&self, token: &str) -> Option<&[String]> {
        self.entries.get(token).map(|group| group.as_slice())
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
