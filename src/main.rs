use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod engine;
mod parsing;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("snplog=debug,info")
    } else {
        EnvFilter::new("snplog=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Merge(args) => {
            cli::merge::run(&args)?;
        }
        cli::Commands::Compare(args) => {
            cli::compare::run(&args, cli.format)?;
        }
        cli::Commands::Diploidize(args) => {
            cli::diploidize::run(&args)?;
        }
    }

    Ok(())
}
