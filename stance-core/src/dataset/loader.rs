//! CSV loader for stance datasets.
//!
//! Reads four positional columns (text, label, target, seen flag) after a
//! header row, maps labels to [`Label`]s and drops already-seen rows from
//! evaluation splits.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use stance_types::{Label, Record};

use crate::error::{Error, Result};

/// Column positions of the four record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Tweet text column.
    pub text: usize,
    /// Stance label column.
    pub label: usize,
    /// Target column.
    pub target: usize,
    /// Seen flag column.
    pub seen: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            text: 0,
            label: 1,
            target: 2,
            seen: 3,
        }
    }
}

impl ColumnLayout {
    /// Text, target, label, seen: the order used by the published
    /// zero-shot stance CSVs.
    pub const fn target_first() -> Self {
        Self {
            text: 0,
            target: 1,
            label: 2,
            seen: 3,
        }
    }

    /// Minimum row width this layout can read.
    pub fn required_columns(&self) -> usize {
        self.text.max(self.label).max(self.target).max(self.seen) + 1
    }
}

/// Loader options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Where each field lives in a row.
    pub layout: ColumnLayout,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            delimiter: b',',
        }
    }
}

/// Which split a file belongs to, deciding whether seen rows survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// Training data: every row is kept.
    Train,
    /// Validation or test data: rows with seen flag 1 are dropped.
    Eval,
}

impl Split {
    /// A path containing `"train"` anywhere is a training split.
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().contains("train") {
            Split::Train
        } else {
            Split::Eval
        }
    }

    #[inline]
    fn keeps(self, seen: bool) -> bool {
        self == Split::Train || !seen
    }
}

/// Dataset loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Creates a loader with the given options.
    pub const fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Returns the loader options.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Loads a dataset file, inferring the split from its path.
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file cannot be opened, `Error::Csv` for malformed
    /// data and `Error::MissingColumns` for rows narrower than the layout.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Record>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let split = Split::from_path(path);

        tracing::debug!(path = %path.display(), ?split, "loading dataset");
        self.load_from_reader(file, split)
    }

    /// Loads records from any reader. The first row is a header.
    pub fn load_from_reader<R: Read>(&self, reader: R, split: Split) -> Result<Vec<Record>> {
        let layout = self.config.layout;
        let required = layout.required_columns();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.config.delimiter)
            .from_reader(reader);

        let header_width = reader.byte_headers()?.len();
        if header_width < required {
            return Err(Error::MissingColumns {
                line: 1,
                found: header_width,
                required,
            });
        }

        let mut records = Vec::new();
        let mut read = 0usize;
        let mut unknown = 0usize;

        for row in reader.byte_records() {
            let row = row?;
            let line = row.position().map_or(0, |p| p.line());
            if row.len() < required {
                return Err(Error::MissingColumns {
                    line,
                    found: row.len(),
                    required,
                });
            }
            read += 1;

            let field = |idx: usize| decode_field(&row[idx]);

            let seen_raw = field(layout.seen);
            let seen = match parse_seen(&seen_raw) {
                Some(seen) => seen,
                None => {
                    tracing::debug!(line, value = %seen_raw, "non-numeric seen flag, treating as unseen");
                    false
                }
            };
            if !split.keeps(seen) {
                continue;
            }

            let label = Label::parse(&field(layout.label));
            if let Label::Unknown(raw) = &label {
                unknown += 1;
                tracing::warn!(line, label = %raw, "unrecognised stance label kept as-is");
            }

            records.push(Record {
                text: field(layout.text),
                label,
                target: field(layout.target),
                seen,
            });
        }

        tracing::debug!(
            read,
            kept = records.len(),
            dropped = read - records.len(),
            "dataset loaded"
        );
        if unknown > 0 {
            tracing::warn!(unknown, "dataset contains unrecognised stance labels");
        }

        Ok(records)
    }
}

/// Loads `path` with the default layout, inferring the split from the path.
pub fn load_data(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    Loader::default().load(path)
}

/// Decodes a field as UTF-8, falling back to ISO-8859-1 where every byte is
/// its own code point. Never fails.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// `Some(true)` for a numeric 1, `Some(false)` for any other number,
/// `None` when the cell is not numeric.
fn parse_seen(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(false);
    }
    raw.parse::<f64>().ok().map(|v| v == 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stance_types::Stance;

    const HEADER: &str = "Tweet,Stance,Target,seen\n";

    fn load(csv: &str, split: Split) -> Result<Vec<Record>> {
        Loader::default().load_from_reader(csv.as_bytes(), split)
    }

    #[test]
    fn reads_four_columns() {
        let csv = format!("{HEADER}\"Go, team!\",FAVOR,Hillary Clinton,0\n");
        let records = load(&csv, Split::Train).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "Go, team!");
        assert_eq!(records[0].label, Label::Known(Stance::Favor));
        assert_eq!(records[0].target, "Hillary Clinton");
        assert!(!records[0].seen);
    }

    #[test]
    fn canonical_labels_get_codes() {
        let csv = format!("{HEADER}a,AGAINST,t,0\nb,FAVOR,t,0\nc,NONE,t,0\n");
        let codes: Vec<_> = load(&csv, Split::Train)
            .unwrap()
            .iter()
            .map(|r| r.label.code())
            .collect();
        assert_eq!(codes, [Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn unknown_label_passes_through() {
        let csv = format!("{HEADER}a,UNRELATED,t,0\n");
        let records = load(&csv, Split::Train).unwrap();
        assert_eq!(records[0].label, Label::Unknown("UNRELATED".into()));
    }

    #[test]
    fn eval_split_drops_seen_rows() {
        let csv = format!("{HEADER}r1,FAVOR,t,1\nr2,NONE,t,0\nr3,AGAINST,t,1\nr4,FAVOR,t,0\n");
        let records = load(&csv, Split::Eval).unwrap();
        let texts: Vec<_> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["r2", "r4"]);
    }

    #[test]
    fn train_split_keeps_seen_rows() {
        let csv = format!("{HEADER}r1,FAVOR,t,1\nr2,NONE,t,0\n");
        let records = load(&csv, Split::Train).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].seen);
    }

    #[test]
    fn seen_flag_parsing() {
        assert_eq!(parse_seen("1"), Some(true));
        assert_eq!(parse_seen(" 1.0 "), Some(true));
        assert_eq!(parse_seen("0"), Some(false));
        assert_eq!(parse_seen(""), Some(false));
        assert_eq!(parse_seen("yes"), None);

        let csv = format!("{HEADER}r1,FAVOR,t,yes\n");
        assert_eq!(load(&csv, Split::Eval).unwrap().len(), 1);
    }

    #[test]
    fn narrow_header_is_rejected() {
        let err = load("Tweet,Stance,Target\na,FAVOR,t\n", Split::Train).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumns {
                line: 1,
                found: 3,
                required: 4
            }
        ));
    }

    #[test]
    fn narrow_row_is_rejected() {
        let csv = format!("{HEADER}a,FAVOR,t,0\nb,NONE\n");
        let err = load(&csv, Split::Train).unwrap_err();
        assert!(matches!(err, Error::MissingColumns { line: 3, found: 2, .. }));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = load("", Split::Train).unwrap_err();
        assert!(matches!(err, Error::MissingColumns { found: 0, .. }));
    }

    #[test]
    fn header_only_is_empty_dataset() {
        assert!(load(HEADER, Split::Eval).unwrap().is_empty());
    }

    #[test]
    fn latin1_bytes_are_decoded() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"caf\xe9 \x93quoted\x94,NONE,t,0\n");
        let records = Loader::default()
            .load_from_reader(bytes.as_slice(), Split::Train)
            .unwrap();
        assert_eq!(records[0].text, "caf\u{e9} \u{93}quoted\u{94}");
    }

    #[test]
    fn utf8_is_kept() {
        let csv = format!("{HEADER}na\u{ef}ve \u{1F600},NONE,t,0\n");
        let records = load(&csv, Split::Train).unwrap();
        assert_eq!(records[0].text, "na\u{ef}ve \u{1F600}");
    }

    #[test]
    fn target_first_layout() {
        let loader = Loader::new(LoaderConfig {
            layout: ColumnLayout::target_first(),
            ..Default::default()
        });
        assert_eq!(loader.config().layout.label, 2);
        assert_eq!(loader.config().delimiter, b',');
        let csv = "Tweet,Target,Stance,seen\nhello,Atheism,AGAINST,0\n";
        let records = loader.load_from_reader(csv.as_bytes(), Split::Train).unwrap();
        assert_eq!(records[0].target, "Atheism");
        assert_eq!(records[0].label, Label::Known(Stance::Against));
    }

    #[test]
    fn custom_delimiter() {
        let loader = Loader::new(LoaderConfig {
            delimiter: b'\t',
            ..Default::default()
        });
        let tsv = "Tweet\tStance\tTarget\tseen\na, b\tFAVOR\tt\t0\n";
        let records = loader.load_from_reader(tsv.as_bytes(), Split::Train).unwrap();
        assert_eq!(records[0].text, "a, b");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "Tweet,Stance,Target,seen,extra\na,FAVOR,t,0,zzz\n";
        assert_eq!(load(csv, Split::Train).unwrap().len(), 1);
    }

    #[test]
    fn split_from_path() {
        assert_eq!(Split::from_path(Path::new("data/raw_train_all.csv")), Split::Train);
        assert_eq!(Split::from_path(Path::new("data/raw_val_all.csv")), Split::Eval);
        assert_eq!(Split::from_path(Path::new("trainset/test.csv")), Split::Train);
    }

    #[test]
    fn load_infers_split_from_path() {
        let dir = crate::testutil::eval_tempdir();
        let body = format!("{HEADER}r1,FAVOR,t,1\nr2,NONE,t,0\nr3,AGAINST,t,1\nr4,FAVOR,t,0\n");

        let test_path = dir.path().join("raw_test_all.csv");
        std::fs::write(&test_path, &body).unwrap();
        let texts: Vec<_> = load_data(&test_path)
            .unwrap()
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts, ["r2", "r4"]);

        let train_path = dir.path().join("raw_train_all.csv");
        std::fs::write(&train_path, &body).unwrap();
        assert_eq!(load_data(&train_path).unwrap().len(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_data("/no/such/dir/raw_test.csv").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
