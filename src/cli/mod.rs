//! Command-line interface for snplog.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **merge**: Remap a branch 2 SNP log into branch 1 coordinates across
//!   the branch 1 indel log, composing overlapping edits
//! - **compare**: Score an observed SNP log against the expected
//!   (ground-truth) log and report confusion-matrix statistics
//! - **diploidize**: Combine two haploid SNP logs into one diploid log
//!
//! ## Usage
//!
//! ```text
//! # Remap branch 2 into branch 1 coordinates
//! snplog merge --fai ref.fa.fai -i branch1.indels -b branch1.snps -c branch2.snps > merged.snps
//!
//! # Score calls against truth, with a per-category site log
//! snplog compare --fai ref.fa.fai -e expected.snps -o observed.snp -n fns.snp
//!
//! # JSON statistics for scripting
//! snplog compare --fai ref.fa.fai -e expected.snps -o observed.snp --format json
//!
//! # Build the diploid log from two haploid branches
//! snplog diploidize --fai ref.fa.fai -a hap1.snps -b hap2.snps > diploid.snps
//! ```

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::core::{VariantLog, VariantRecord};
use crate::parsing::fai::ScaffoldIndex;

pub mod compare;
pub mod diploidize;
pub mod merge;

#[derive(Parser)]
#[command(name = "snplog")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Reconcile simulated and called per-site mutation logs")]
#[command(
    long_about = "snplog reconciles the per-site mutation logs a simulation/variant-calling pipeline produces.\n\nAll three commands are forward single-pass merges over per-scaffold, position-sorted records:\n- merge translates a second branch's log across intervening indels and composes overlapping edits\n- compare scores observed calls against ground truth with diploid allele-copy accounting\n- diploidize collapses two haploid logs into one log of degenerate ambiguity codes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the compare report
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge a branch 2 SNP log into branch 1's coordinate space
    Merge(merge::MergeArgs),

    /// Compare an observed SNP log against the expected SNP log
    Compare(compare::CompareArgs),

    /// Combine two haploid SNP logs into a diploid log
    Diploidize(diploidize::DiploidizeArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Write merged per-scaffold records as a 4-column mutation log.
pub(crate) fn write_log(
    out: &mut impl Write,
    scaffolds: &[(String, Vec<VariantRecord>)],
) -> io::Result<()> {
    for (scaffold, records) in scaffolds {
        for record in records {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                scaffold, record.position, record.ref_allele, record.called_allele
            )?;
        }
    }
    Ok(())
}

/// Scaffolds absent from the index are never visited by an engine pass.
pub(crate) fn warn_unknown_scaffolds(index: &ScaffoldIndex, log: &VariantLog, role: &str) {
    for scaffold in log.scaffolds() {
        if !index.contains(scaffold) {
            warn!(scaffold, role, "log scaffold missing from the index; its records are skipped");
        }
    }
}
