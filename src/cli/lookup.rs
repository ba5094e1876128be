use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::reference::VerseRange;
use crate::passage::resolver::{PassageResolver, DEFAULT_BOOKS_KEY};
use crate::utils::paths::DEFAULT_CORPUS;

#[derive(Args)]
pub struct LookupArgs {
    /// Verse reference, e.g. "John 3:16", "1 John 4:7-8" or "GEN 1:1-3"
    #[arg(required = true, num_args = 1..)]
    pub reference: Vec<String>,

    /// Bible corpus JSON file
    #[arg(long, default_value = DEFAULT_CORPUS)]
    pub corpus: PathBuf,

    /// Top-level corpus key that holds the books
    #[arg(long, default_value = DEFAULT_BOOKS_KEY)]
    pub books_key: String,
}

pub fn run(args: LookupArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = args.reference.join(" ");
    let range: VerseRange = text.parse()?;

    if verbose {
        eprintln!("Looking up {range} in {}", args.corpus.display());
    }

    let passage = PassageResolver::new(&args.corpus)
        .with_books_key(&args.books_key)
        .resolve(&range)
        .with_context(|| format!("Failed to look up {range}"))?;

    match format {
        OutputFormat::Text => {
            println!("{passage}");
            println!();
            println!("  {}", range.label());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "reference": range.to_string(),
                "label": range.label(),
                "text": passage.text(),
                "verses": passage.verses(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
