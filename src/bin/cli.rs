//! Otodom scraper CLI
//!
//! Runs the full scrape when invoked without a subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use otodom_scraper::{
    browser,
    config::load_all,
    error::Result,
    pipeline,
    services::listing_url,
    storage::FileSink,
};

/// Otodom listing scraper
#[derive(Parser, Debug)]
#[command(name = "otodom-scraper", version, about = "Sequential Otodom listing scraper")]
struct Cli {
    /// Path to the parameters file
    #[arg(short, long, default_value = "config/parameters.toml")]
    config: PathBuf,

    /// Path to the presets file
    #[arg(short, long, default_value = "config/presets.toml")]
    presets: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape every listing page and write the results (default)
    Scrape,

    /// Validate the parameters and presets files
    Validate,

    /// Print the listing URL for a page
    Url {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (config, presets) = match load_all(&cli.config, &cli.presets) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
    };

    match cli.command.unwrap_or(Command::Scrape) {
        Command::Scrape => {
            log::info!("Otodom scraper starting...");
            let source = browser::from_config(&config.browser)?;
            let sink = FileSink::from_config(&config.output);
            let outcome = pipeline::run_scraper(&config, &presets, source, &sink).await?;
            log::info!("Done! {} estates collected", outcome.estates.len());
            log::info!("Run statistics: {}", serde_json::to_string(&outcome.stats)?);
        }

        Command::Validate => {
            log::info!("✓ Parameters OK: {}", cli.config.display());
            log::info!("    backend: {:?}", config.browser.backend);
            log::info!("    page limit: {}", config.crawler.page_limit);
            log::info!("    retry attempts: {}", config.retry.max_attempts);
            log::info!("    results file: {}", config.output.results_file.display());
            log::info!("✓ Presets OK: {}", cli.presets.display());
            for (name, value) in presets.entries() {
                log::info!("    {name}: {value}");
            }
        }

        Command::Url { page } => {
            println!("{}", listing_url(&config.search, page)?);
        }
    }

    Ok(())
}
