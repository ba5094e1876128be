use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use tracing::warn;

use crate::catalog::check::{check_references, CatalogReport};
use crate::catalog::csv::parse_catalog_csv_file;
use crate::catalog::store::VotdCatalog;
use crate::cli::{load_catalog, OutputFormat};
use crate::core::book;
use crate::core::reference::VerseReference;
use crate::core::types::VerseId;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all verse references in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Filter by book code or name (e.g., "PSA" or "Psalms")
        #[arg(long)]
        book: Option<String>,
    },

    /// Show one catalog entry
    Show {
        /// Verse ID
        #[arg(required = true)]
        id: u32,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Check a catalog (JSON or CSV) for duplicate IDs and references
    Check {
        /// Path to catalog file; .csv files are parsed as CSV
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Convert a CSV catalog (id,book,chapter,verse) to JSON
    Import {
        /// Input CSV file
        #[arg(required = true)]
        input: PathBuf,

        /// Output JSON file
        #[arg(required = true)]
        output: PathBuf,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, book } => {
            run_list(catalog.as_deref(), book.as_deref(), format, verbose)
        }
        CatalogCommands::Show { id, catalog } => run_show(id, catalog.as_deref(), format),
        CatalogCommands::Check { catalog } => run_check(catalog.as_deref(), format),
        CatalogCommands::Import {
            input,
            output,
            force,
        } => run_import(&input, &output, force, verbose),
        CatalogCommands::Export { output, catalog } => run_export(&output, catalog.as_deref()),
    }
}

fn run_list(
    catalog_path: Option<&Path>,
    book_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    if verbose {
        eprintln!("Loaded catalog with {} verse references", catalog.len());
    }

    let book_code = match book_filter {
        Some(filter) => Some(
            book::resolve_book(filter)
                .map(str::to_string)
                .unwrap_or_else(|| filter.to_ascii_uppercase()),
        ),
        None => None,
    };

    let filtered: Vec<&VerseReference> = catalog
        .references
        .iter()
        .filter(|r| {
            book_code
                .as_deref()
                .map_or(true, |code| r.range.book_code.as_str() == code)
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let ref_width = filtered
                .iter()
                .map(|r| r.range.to_string().len())
                .max()
                .unwrap_or(9)
                .max(9);

            println!("Verse Catalog ({} references)\n", filtered.len());
            println!("{:>6} {:<ref_w$} Label", "ID", "Reference", ref_w = ref_width);
            println!("{}", "-".repeat(6 + ref_width + 30));
            for r in &filtered {
                println!(
                    "{:>6} {:<ref_w$} {}",
                    r.id,
                    r.range.to_string(),
                    r.range.label(),
                    ref_w = ref_width
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
    }

    Ok(())
}

fn run_show(id: u32, catalog_path: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let reference = catalog
        .get(VerseId::new(id))
        .ok_or_else(|| anyhow::anyhow!("Verse ID {id} not found in catalog"))?;

    match format {
        OutputFormat::Text => {
            let range = &reference.range;
            println!("Verse: {}\n", range.label());
            println!("ID:      {}", reference.id);
            println!("Book:    {}", range.book_code);
            println!("Chapter: {}", range.chapter);
            println!("Verses:  {}-{}", range.verse_start, range.verse_end);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reference)?);
        }
    }

    Ok(())
}

fn load_references(path: Option<&Path>) -> anyhow::Result<Vec<VerseReference>> {
    let is_csv = path
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    match path {
        Some(path) if is_csv => parse_catalog_csv_file(path)
            .with_context(|| format!("Failed to parse catalog CSV {}", path.display())),
        _ => Ok(load_catalog(path)?.references),
    }
}

fn run_check(catalog_path: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let references = load_references(catalog_path)?;
    let report = check_references(&references);

    match format {
        OutputFormat::Text => print_check_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.has_errors() {
        bail!(
            "{} verse ID(s) are used by more than one entry",
            report.duplicate_ids.len()
        );
    }
    Ok(())
}

fn print_check_text(report: &CatalogReport) {
    println!("Loaded {} verse entries.", report.entries);

    println!("\n=== Duplicate ID Check ===");
    if report.duplicate_ids.is_empty() {
        println!("OK: No duplicate IDs found.");
    } else {
        println!("FAILURE: Duplicate IDs:");
        for dup in &report.duplicate_ids {
            let ranges: Vec<String> = dup.ranges.iter().map(ToString::to_string).collect();
            println!("ID {}: {}", dup.id, ranges.join("  <==>  "));
        }
    }

    println!("\n=== Duplicate Reference Check ===");
    if report.duplicate_ranges.is_empty() {
        println!("OK: No duplicate references found.");
    } else {
        println!("WARNING: Duplicate references:");
        for dup in &report.duplicate_ranges {
            let ids: Vec<String> = dup.ids.iter().map(ToString::to_string).collect();
            println!("{}: used by IDs {}", dup.range, ids.join(", "));
        }
    }
}

fn run_import(input: &Path, output: &Path, force: bool, verbose: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        bail!(
            "Output file {} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let references = parse_catalog_csv_file(input)
        .with_context(|| format!("Failed to parse catalog CSV {}", input.display()))?;

    let report = check_references(&references);
    if !report.is_clean() {
        warn!(
            "{} has {} duplicate ID(s) and {} duplicate reference(s); run `manna catalog check --catalog {}`",
            input.display(),
            report.duplicate_ids.len(),
            report.duplicate_ranges.len(),
            input.display()
        );
    }
    if verbose {
        eprintln!("Parsed {} rows from {}", references.len(), input.display());
    }

    let catalog = VotdCatalog::from_references(references)?;
    std::fs::write(output, catalog.to_json()? + "\n")
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Imported {} verse references to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}

fn run_export(output: &Path, catalog_path: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    println!(
        "Exported {} verse references to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}
