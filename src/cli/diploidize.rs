use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{warn_unknown_scaffolds, write_log};
use crate::engine::DiploidizeEngine;
use crate::parsing::fai::ScaffoldIndex;
use crate::parsing::snplog;

#[derive(Args)]
pub struct DiploidizeArgs {
    /// FASTA index (.fai) defining scaffold order
    #[arg(short = 'f', long = "fai", required = true)]
    pub fai: PathBuf,

    /// First haploid SNP log
    #[arg(short = 'a', long = "hap1", required = true)]
    pub hap1: PathBuf,

    /// Second haploid SNP log
    #[arg(short = 'b', long = "hap2", required = true)]
    pub hap2: PathBuf,
}

/// Execute diploidize subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be opened or parsed, or if writing the
/// combined log fails.
pub fn run(args: &DiploidizeArgs) -> anyhow::Result<()> {
    let index = ScaffoldIndex::from_path(&args.fai)
        .with_context(|| format!("failed to read FASTA index {}", args.fai.display()))?;

    info!(path = %args.hap1.display(), "reading first haploid SNP log");
    let hap1 = snplog::read_log(&args.hap1)
        .with_context(|| format!("failed to read haploid SNP log {}", args.hap1.display()))?;

    info!(path = %args.hap2.display(), "reading second haploid SNP log");
    let hap2 = snplog::read_log(&args.hap2)
        .with_context(|| format!("failed to read haploid SNP log {}", args.hap2.display()))?;

    warn_unknown_scaffolds(&index, &hap1, "first haploid");
    warn_unknown_scaffolds(&index, &hap2, "second haploid");

    info!("combining haploid SNP logs");
    let engine = DiploidizeEngine::new();
    let merged = engine.diploidize_logs(index.iter().map(|s| s.name.as_str()), &hap1, &hap2);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_log(&mut out, &merged).context("failed to write combined SNP log")?;
    out.flush().context("failed to write combined SNP log")?;

    info!("done combining haploid SNP logs");
    Ok(())
}
