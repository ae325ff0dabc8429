use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{self, CommandReport};
use crate::cull::config::CliOverrides;

#[derive(Debug, Parser)]
#[command(
    name = "trackcull",
    version = concat!(env!("CARGO_PKG_VERSION"), " (build ", env!("BUILD_ID"), ")"),
    about = "Catalog an audio collection, keep the best copy of each track, quarantine the rest"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Deduplicate a collection and place winners under destination/artist/album
    Organize(OrganizeArgs),
    /// Print a format census of a tree without changing anything
    Report {
        /// Directory to scan
        source: PathBuf,
    },
}

#[derive(Debug, Args)]
struct OrganizeArgs {
    /// Config file (default: TRACKCULL_CONFIG_PATH, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory to scan for audio files
    #[arg(long)]
    source: Option<PathBuf>,
    /// Destination library root
    #[arg(long)]
    dest: Option<PathBuf>,
    /// Quarantine folder for corrupt or untaggable files
    #[arg(long)]
    review: Option<PathBuf>,
    /// Log every action but change nothing on disk
    #[arg(long)]
    dry_run: bool,
    /// Copy winners into the library instead of moving; never delete sources
    #[arg(long)]
    copy: bool,
    /// Where to write the JSONL action log
    #[arg(long)]
    log: Option<PathBuf>,
}

impl From<OrganizeArgs> for CliOverrides {
    fn from(args: OrganizeArgs) -> Self {
        CliOverrides {
            config_path: args.config,
            source_root: args.source,
            destination_root: args.dest,
            review_root: args.review,
            dry_run: args.dry_run,
            copy_instead_of_move: args.copy,
            log_path: args.log,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let report = match cli.command {
        Command::Organize(args) => commands::organize::run(&CliOverrides::from(args))?,
        Command::Report { source } => commands::report::run(&source)?,
    };

    print_report(&report);
    if !report.ok {
        anyhow::bail!("{} finished with issues", report.command);
    }
    Ok(())
}

fn print_report(report: &CommandReport) {
    for line in &report.details {
        println!("{line}");
    }
    for line in &report.issues {
        eprintln!("issue: {line}");
    }
}
