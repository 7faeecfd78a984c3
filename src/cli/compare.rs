use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::engine::{DetailWriters, DiffEngine, DiffReport};
use crate::parsing::fai::ScaffoldIndex;
use crate::parsing::snplog;

#[derive(Args)]
pub struct CompareArgs {
    /// FASTA index (.fai) defining scaffold order and lengths
    #[arg(short = 'f', long = "fai", required = true)]
    pub fai: PathBuf,

    /// Expected (ground-truth) SNP log
    #[arg(short = 'e', long = "expected", required = true)]
    pub expected: PathBuf,

    /// Observed (called) SNP log
    #[arg(short = 'o', long = "observed", required = true)]
    pub observed: PathBuf,

    /// Write false negative sites to this file
    #[arg(short = 'n', long = "false-negatives")]
    pub false_negatives: Option<PathBuf>,

    /// Write false positive sites to this file
    #[arg(short = 'p', long = "false-positives")]
    pub false_positives: Option<PathBuf>,

    /// Write true positive sites to this file
    #[arg(short = 't', long = "true-positives")]
    pub true_positives: Option<PathBuf>,

    /// Write wrong-call sites to this file
    #[arg(short = 'r', long = "wrong-calls")]
    pub wrong_calls: Option<PathBuf>,

    /// Minimum raw depth for an expected site to count as callable (0 = disabled)
    #[arg(short = 'm', long = "min-depth", default_value = "0")]
    pub min_depth: u64,
}

/// Execute compare subcommand
///
/// # Errors
///
/// Returns an error if any input cannot be opened or parsed, a detail output
/// cannot be created, or writing the report fails.
pub fn run(args: &CompareArgs, format: OutputFormat) -> anyhow::Result<()> {
    let index = ScaffoldIndex::from_path(&args.fai)
        .with_context(|| format!("failed to read FASTA index {}", args.fai.display()))?;

    info!(path = %args.expected.display(), min_depth = args.min_depth, "reading expected SNP log");
    let (expected, uncallable) = snplog::read_expected_log(&args.expected, args.min_depth)
        .with_context(|| format!("failed to read expected SNP log {}", args.expected.display()))?;

    info!(path = %args.observed.display(), "reading observed SNP log");
    let observed = snplog::read_raw_log(&args.observed)
        .with_context(|| format!("failed to read observed SNP log {}", args.observed.display()))?;

    let writers = DetailWriters {
        false_negatives: open_sink(args.false_negatives.as_deref(), "false negative")?,
        false_positives: open_sink(args.false_positives.as_deref(), "false positive")?,
        true_positives: open_sink(args.true_positives.as_deref(), "true positive")?,
        wrong_calls: open_sink(args.wrong_calls.as_deref(), "wrong call")?,
    };

    info!("comparing SNP logs");
    let mut engine = DiffEngine::new(&index, &uncallable, writers);
    let counters = engine
        .compare(&expected, &observed)
        .context("failed to write a detail log")?;
    let report = DiffReport::from_counters(&counters, index.genome_size());

    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    info!("done comparing SNP logs");
    Ok(())
}

fn open_sink(path: Option<&Path>, category: &str) -> anyhow::Result<Option<Box<dyn Write>>> {
    match path {
        None => Ok(None),
        Some(path) => {
            let file = File::create(path).with_context(|| {
                format!("failed to create {category} output file {}", path.display())
            })?;
            Ok(Some(Box::new(BufWriter::new(file))))
        }
    }
}
