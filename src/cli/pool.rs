use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::cli::{load_catalog, OutputFormat};
use crate::pool::{FilePoolStore, Pool, PoolState, PoolStore};
use crate::utils::paths::pool_path_or_default;

#[derive(Args)]
pub struct PoolArgs {
    #[command(subcommand)]
    pub command: PoolCommands,
}

#[derive(Subcommand)]
pub enum PoolCommands {
    /// Show how many verses are left in the current cycle
    Status {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Pool state file (defaults to ~/.manna/unused_ids.json)
        #[arg(long)]
        pool: Option<PathBuf>,
    },

    /// Start a new cycle with every catalog verse available
    Reset {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Pool state file (defaults to ~/.manna/unused_ids.json)
        #[arg(long)]
        pool: Option<PathBuf>,
    },
}

pub fn run(args: PoolArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        PoolCommands::Status { catalog, pool } => run_status(catalog, pool, format),
        PoolCommands::Reset { catalog, pool } => run_reset(catalog, pool, verbose),
    }
}

fn run_status(
    catalog_path: Option<PathBuf>,
    pool_path: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let pool_path = pool_path_or_default(pool_path)?;
    let store = FilePoolStore::new(&pool_path);

    let loaded = store
        .load(&catalog.ids())
        .with_context(|| format!("Failed to read pool {}", pool_path.display()))?;

    let state = match loaded.state {
        PoolState::Resumed => "in progress".to_string(),
        PoolState::Reset(reason) => format!("new cycle on next pick ({reason})"),
    };

    match format {
        OutputFormat::Text => {
            println!("Pool file: {}", pool_path.display());
            println!("Remaining: {} of {}", loaded.pool.len(), catalog.len());
            println!("State:     {state}");
        }
        OutputFormat::Json => {
            let remaining: Vec<u32> = loaded.pool.iter().map(|id| id.0).collect();
            let output = serde_json::json!({
                "pool_file": pool_path.display().to_string(),
                "total": catalog.len(),
                "remaining": remaining.len(),
                "resumed": loaded.state == PoolState::Resumed,
                "state": state,
                "ids": remaining,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn run_reset(
    catalog_path: Option<PathBuf>,
    pool_path: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let pool_path = pool_path_or_default(pool_path)?;
    let mut store = FilePoolStore::new(&pool_path);

    let pool = Pool::full(&catalog.ids());
    store
        .save(&pool)
        .with_context(|| format!("Failed to write pool {}", pool_path.display()))?;

    if verbose {
        eprintln!("Wrote {} ids to {}", pool.len(), pool_path.display());
    }
    println!("Pool reset: {} verses available", pool.len());

    Ok(())
}
