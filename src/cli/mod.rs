//! Command-line interface for manna.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **votd**: Pick the next verse of the day and print its text
//! - **lookup**: Print the text of any verse range
//! - **catalog**: List, show, check, import or export the verse catalog
//! - **pool**: Inspect or reset the persisted pool of unused verses
//!
//! ## Usage
//!
//! ```text
//! # Verse of the day from the default corpus
//! manna votd
//!
//! # Explicit corpus and pool file, JSON output
//! manna votd --corpus bible_kjv.json --pool ./unused_ids.json --format json
//!
//! # Ad-hoc lookup
//! manna lookup John 3:16-17
//!
//! # Convert a CSV catalog and check it for duplicates
//! manna catalog import votd.csv votd.json
//! manna catalog check --catalog votd.json
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::catalog::store::VotdCatalog;

pub mod catalog;
pub mod lookup;
pub mod pool;
pub mod votd;

#[derive(Parser)]
#[command(name = "manna")]
#[command(version)]
#[command(about = "A verse of the day that never repeats until every verse has been shown")]
#[command(
    long_about = "manna picks a verse of the day from a fixed catalog without repeating any entry until the whole catalog has been shown, remembering the remaining verses between runs.\n\nPassages are read from a keyed JSON Bible corpus in a single streaming pass, so only the requested verses are ever decoded."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick the next verse of the day and print it
    Votd(votd::VotdArgs),

    /// Print the text of a verse range (e.g. "John 3:16" or "GEN 1:1-3")
    Lookup(lookup::LookupArgs),

    /// Manage the verse catalog
    Catalog(catalog::CatalogArgs),

    /// Inspect or reset the pool of unused verses
    Pool(pool::PoolArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Load a custom catalog, or the embedded one when no path is given
pub(crate) fn load_catalog(path: Option<&Path>) -> anyhow::Result<VotdCatalog> {
    match path {
        Some(path) => VotdCatalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => VotdCatalog::load_embedded().context("Failed to load embedded catalog"),
    }
}
