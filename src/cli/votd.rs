use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::warn;

use crate::cli::{load_catalog, OutputFormat};
use crate::farewell;
use crate::passage::resolver::{PassageResolver, DEFAULT_BOOKS_KEY};
use crate::passage::Passage;
use crate::picker::{PickError, Picker};
use crate::pool::{FilePoolStore, PoolState};
use crate::utils::paths::{pool_path_or_default, DEFAULT_CORPUS};

#[derive(Args)]
pub struct VotdArgs {
    /// Path to custom catalog file (defaults to the embedded catalog)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Pool state file (defaults to ~/.manna/unused_ids.json)
    #[arg(long)]
    pub pool: Option<PathBuf>,

    /// Bible corpus JSON file
    #[arg(long, default_value = DEFAULT_CORPUS)]
    pub corpus: PathBuf,

    /// Top-level corpus key that holds the books
    #[arg(long, default_value = DEFAULT_BOOKS_KEY)]
    pub books_key: String,

    /// Seed the random draw (for reproducible picks)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not print a farewell line after the verse
    #[arg(long)]
    pub no_farewell: bool,
}

pub fn run(args: VotdArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let pool_path = pool_path_or_default(args.pool)?;

    let store = FilePoolStore::new(&pool_path);
    let mut picker = match args.seed {
        Some(seed) => Picker::with_seed(&catalog, store, seed),
        None => Picker::new(&catalog, store),
    };

    // A failed save still yields a verse: show it, then report the failure
    let (reference, remaining, persist_error) = match picker.draw() {
        Ok(pick) => {
            if verbose {
                if let PoolState::Reset(reason) = pick.pool_state {
                    eprintln!("Started a new cycle ({reason})");
                }
                eprintln!(
                    "{} of {} verses left in this cycle",
                    pick.remaining,
                    catalog.len()
                );
            }
            (pick.reference, Some(pick.remaining), None)
        }
        Err(PickError::Persist { reference, source }) => {
            warn!("Verse pool was not saved to {}: {source}", pool_path.display());
            (*reference, None, Some(source))
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to pick a verse (pool: {})", pool_path.display())
            })
        }
    };

    let resolver = PassageResolver::new(&args.corpus).with_books_key(&args.books_key);
    let passage = resolver
        .resolve(&reference.range)
        .with_context(|| format!("Failed to look up {}", reference.range))?;

    match format {
        OutputFormat::Text => print_text(&passage, !args.no_farewell),
        OutputFormat::Json => print_json(reference.id.0, &passage, remaining)?,
    }

    if let Some(source) = persist_error {
        return Err(anyhow::Error::new(source).context(format!(
            "Verse pool was not saved to {}; {} may be picked again",
            pool_path.display(),
            reference.range
        )));
    }

    Ok(())
}

fn print_text(passage: &Passage, farewell: bool) {
    println!("{passage}");
    println!();
    println!("  {}", passage.range().label());
    if farewell {
        println!();
        println!("{}", farewell::choose());
    }
}

fn print_json(id: u32, passage: &Passage, remaining: Option<usize>) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "id": id,
        "reference": passage.range().to_string(),
        "label": passage.range().label(),
        "text": passage.text(),
        "verses": passage.verses(),
        "remaining": remaining,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
