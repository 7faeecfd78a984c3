use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::engine::{CoordinateMap, MergeEngine};
use crate::parsing::fai::ScaffoldIndex;
use crate::parsing::{indel, snplog};

#[derive(Args)]
pub struct MergeArgs {
    /// FASTA index (.fai) defining scaffold order
    #[arg(short = 'f', long = "fai", required = true)]
    pub fai: PathBuf,

    /// Branch 1 indel log
    #[arg(short = 'i', long = "indel-log", required = true)]
    pub indel_log: PathBuf,

    /// Branch 1 SNP log (already in source coordinates)
    #[arg(short = 'b', long = "branch1", required = true)]
    pub branch1: PathBuf,

    /// Branch 2 SNP log (in the coordinate space after branch 1's indels)
    #[arg(short = 'c', long = "branch2", required = true)]
    pub branch2: PathBuf,
}

/// Execute merge subcommand
///
/// # Errors
///
/// Returns an error if any input cannot be opened or parsed, or if writing
/// the merged log fails.
pub fn run(args: &MergeArgs) -> anyhow::Result<()> {
    let index = ScaffoldIndex::from_path(&args.fai)
        .with_context(|| format!("failed to read FASTA index {}", args.fai.display()))?;

    info!(path = %args.indel_log.display(), "reading branch 1 indel log");
    let events = indel::read_indel_log(&args.indel_log)
        .with_context(|| format!("failed to read indel log {}", args.indel_log.display()))?;
    let map = CoordinateMap::from_events(&events);

    info!(path = %args.branch1.display(), "reading branch 1 SNP log");
    let branch1 = snplog::read_log(&args.branch1)
        .with_context(|| format!("failed to read branch 1 SNP log {}", args.branch1.display()))?;

    info!(path = %args.branch2.display(), "reading branch 2 SNP log");
    let branch2 = snplog::read_log(&args.branch2)
        .with_context(|| format!("failed to read branch 2 SNP log {}", args.branch2.display()))?;

    super::warn_unknown_scaffolds(&index, &branch1, "branch 1");
    super::warn_unknown_scaffolds(&index, &branch2, "branch 2");

    let engine = MergeEngine::new(&map);
    let merged = engine.merge_logs(index.iter().map(|s| s.name.as_str()), &branch1, &branch2);

    let stdout = std::io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    super::write_log(&mut out, &merged).context("failed to write merged log")?;
    out.flush().context("failed to write merged log")?;

    info!("done merging SNP logs");
    Ok(())
}
