//! bpatch command-line tool
//!
//! `bpatch diff OLD NEW PATCH` writes a patch, `bpatch apply OLD PATCH OUT`
//! rebuilds the new file, `bpatch inspect PATCH` lists its records.

use bpatch::{PatchConfig, PatchError, Patcher};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bpatch", version, about = "Byte-level diff and patch.")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides RUST_LOG
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the patch turning OLD into NEW
    Diff {
        old: PathBuf,
        new: PathBuf,
        patch: PathBuf,
    },
    /// Apply PATCH to OLD and write the result to OUT
    Apply {
        old: PathBuf,
        patch: PathBuf,
        out: PathBuf,
    },
    /// Print the records of PATCH
    Inspect { patch: PathBuf },
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), PatchError> {
    let config = match &cli.config {
        Some(path) => PatchConfig::from_file(path)?,
        None => PatchConfig::default(),
    };
    let patcher = Patcher::builder().config(config).build();

    match cli.command {
        Command::Diff { old, new, patch } => {
            let stats = patcher.diff_files(&old, &new, &patch)?;
            println!(
                "{} edits ({} insert, {} delete, {} replace), cost {}, {} bytes",
                stats.edits(),
                stats.inserts,
                stats.deletes,
                stats.replaces,
                stats.cost,
                stats.patch_len
            );
        }
        Command::Apply { old, patch, out } => {
            let written = patcher.apply_files(&old, &patch, &out)?;
            println!("{} bytes written to {}", written, out.display());
        }
        Command::Inspect { patch } => {
            for (i, edit) in patcher.inspect_file(&patch)?.iter().enumerate() {
                println!("{i:>8}  {edit}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "bpatch failed");
            eprintln!("bpatch: {err}");
            ExitCode::FAILURE
        }
    }
}
