//! tiglevel - inspect and tidy Impossible Game level files
//!
//! Thin front end over `tig-levels`: loads a level directory, runs the
//! requested operation and writes the result back.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tig_config::ConverterConfig;
use tig_levels::{LevelDocument, LevelStore};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tiglevel", version, about = "Inspect and tidy Impossible Game levels")]
struct Cli {
    /// Options file (defaults to ./tiglevel.txt when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a short overview of a level
    Summary {
        /// Level directory
        dir: PathBuf,
    },
    /// Print a level as JSON
    Dump {
        /// Level directory
        dir: PathBuf,
    },
    /// Sort blocks and merge pits, then save
    Tidy {
        /// Level directory
        dir: PathBuf,
        /// Sort blocks by X even if not configured
        #[arg(long)]
        sort: bool,
        /// Merge adjacent pits even if not configured
        #[arg(long)]
        merge_pits: bool,
    },
    /// Write a blank level
    New {
        /// Level directory to create
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConverterConfig::load_from_file(path)?,
        None => ConverterConfig::load_default()?,
    };

    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if config.debug {
        config.display();
    }

    let store = LevelStore::with_level_file(config.level_file.clone());

    match cli.command {
        Command::Summary { dir } => {
            let level = load_complete(&store, &dir)?;
            println!("{}", level.summary());
        }
        Command::Dump { dir } => {
            let level = load_complete(&store, &dir)?;
            println!("{}", serde_json::to_string_pretty(&level)?);
        }
        Command::Tidy { dir, sort, merge_pits } => {
            let options = TidyOptions {
                sort: sort || config.sort_blocks,
                merge_pits: merge_pits || config.merge_pits,
            };
            let target = config.output_dir.clone().unwrap_or_else(|| dir.clone());
            let path = tidy(&store, &dir, &target, options)?;
            info!("Saved {}", path.display());
        }
        Command::New { dir } => {
            let path = store
                .save_dir(&LevelDocument::new(), &dir)
                .with_context(|| format!("writing blank level to {}", dir.display()))?;
            info!("Created {}", path.display());
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
struct TidyOptions {
    sort: bool,
    merge_pits: bool,
}

/// Load a level and refuse partial results
fn load_complete(store: &LevelStore, dir: &Path) -> anyhow::Result<LevelDocument> {
    let level = store.load_dir(dir);
    if let Some(err) = level.load_error() {
        bail!("{} is damaged: {}", store.level_path(dir).display(), err);
    }
    Ok(level)
}

fn tidy(
    store: &LevelStore,
    source: &Path,
    target: &Path,
    options: TidyOptions,
) -> anyhow::Result<PathBuf> {
    let mut level = load_complete(store, source)?;

    if options.merge_pits {
        // Merging sorts first
        let merged = level.merge_adjacent_pits();
        info!("Merged {} pit(s)", merged);
    } else if options.sort {
        level.sort_blocks();
        debug!("Sorted {} block(s)", level.block_count());
    }

    store
        .save_dir(&level, target)
        .with_context(|| format!("saving level to {}", target.display()))
}
