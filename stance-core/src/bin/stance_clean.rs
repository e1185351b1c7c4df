//! Stance Dataset Cleaning Tool
//!
//! Loads a stance CSV, cleans every tweet and target against one or more
//! normalization tables, and prints corpus statistics plus a few samples.
//!
//! ## Usage
//!
//! ```bash
//! # Clean a test split with two slang tables (JSON and tab-separated)
//! ./target/release/stance_clean data/raw_test_all_onecol.csv \
//!     --table noslang_data.json --table emnlp_dict.txt
//!
//! # Files from the published zero-shot splits put the target before the label
//! ./target/release/stance_clean data/raw_val_all_onecol.csv --layout target-first
//!
//! # Clean on all cores and show the first 5 samples
//! RUST_LOG=stance_core=debug ./target/release/stance_clean data.csv --parallel --show 5
//! ```
//!
//! ## Example Output
//!
//! ```text
//! --------------------------------
//! Samples     : 1_249
//! Mean length : 19.482 groups
//! Unknown     : 0 labels
//! Elapsed     : 0.031 s
//! --------------------------------
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use stance_core::{
    clean_all_with, BatchConfig, CleanedCorpus, ColumnLayout, LoaderConfig, NormalizationTable,
    TokenSequence,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    /// text, label, target, seen
    Default,
    /// text, target, label, seen
    TargetFirst,
}

impl From<Layout> for ColumnLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Default => ColumnLayout::default(),
            Layout::TargetFirst => ColumnLayout::target_first(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "stance_clean",
    version,
    about = "Clean a stance-detection tweet dataset and report statistics."
)]
struct Cli {
    /// Dataset file. Paths without "train" drop rows whose seen flag is 1.
    data: PathBuf,

    /// Normalization table (.json object or tab-separated pairs). Repeatable;
    /// later tables override earlier ones.
    #[arg(short, long = "table")]
    tables: Vec<PathBuf>,

    /// Column order of the dataset.
    #[arg(long, value_enum, default_value_t = Layout::Default)]
    layout: Layout,

    /// Field delimiter.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Clean records in parallel.
    #[arg(long)]
    parallel: bool,

    /// Print the first N cleaned samples.
    #[arg(long, default_value_t = 0)]
    show: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stance_core=info")),
        )
        .init();

    let cli = Cli::parse();

    let delimiter = u8::try_from(cli.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("delimiter '{}' is not a single ASCII byte", cli.delimiter))?;

    let mut table = NormalizationTable::new();
    for path in &cli.tables {
        let part = NormalizationTable::from_path(path)
            .with_context(|| format!("loading normalization table {}", path.display()))?;
        table.merge(part);
    }

    let config = BatchConfig {
        loader: LoaderConfig {
            layout: cli.layout.into(),
            delimiter,
        },
        parallel: cli.parallel,
    };

    let start = Instant::now();
    let corpus = clean_all_with(&cli.data, &table, &config)
        .with_context(|| format!("cleaning {}", cli.data.display()))?;
    let elapsed = start.elapsed();

    print_summary(&corpus, table.len(), elapsed.as_secs_f64());
    print_samples(&corpus, cli.show);

    Ok(())
}

fn print_summary(corpus: &CleanedCorpus, table_entries: usize, secs: f64) {
    let stats = &corpus.stats;

    println!("--------------------------------");
    println!("Samples     : {}", fmt_count(stats.num_samples as u64));
    match stats.mean_groups {
        Some(mean) => println!("Mean length : {:.3} groups", mean),
        None => println!("Mean length : n/a"),
    }
    println!("Unknown     : {} labels", corpus.unknown_labels().len());
    println!("Table       : {} entries", fmt_count(table_entries as u64));
    println!("Elapsed     : {:.3} s", secs);
    println!("--------------------------------");
}

fn print_samples(corpus: &CleanedCorpus, n: usize) {
    for i in 0..n.min(corpus.len()) {
        println!(
            "[{}] label={} target={} text={}",
            i,
            corpus.labels[i],
            fmt_sequence(&corpus.targets[i]),
            fmt_sequence(&corpus.texts[i]),
        );
    }
}

fn fmt_sequence(seq: &TokenSequence) -> String {
    let groups: Vec<String> = seq.iter().map(|g| g.join(" ")).collect();
    format!("[{}]", groups.join(" | "))
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
