use clap::Parser;
use tracing_subscriber::EnvFilter;

use manna::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("manna=debug,info")
    } else {
        EnvFilter::new("manna=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Votd(args) => {
            cli::votd::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Lookup(args) => {
            cli::lookup::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Pool(args) => {
            cli::pool::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
