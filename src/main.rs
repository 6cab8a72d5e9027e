//! `product-lens <url> <html-file> [--config <path>] [--pretty]`
//!
//! Extracts one saved product page and prints the record as JSON on stdout.
//! Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use product_lens_lib::infrastructure::logging::init_logging_with_config;
use product_lens_lib::{ExtractorConfig, PageHandle, ProductExtractor};
use std::path::PathBuf;
use tracing::{info, warn};

/// Extract product attributes from a saved marketplace page.
#[derive(Parser, Debug)]
#[command(name = "product-lens")]
#[command(version)]
#[command(about = "Extract product attributes from a saved marketplace page")]
struct CliArgs {
    /// Page URL, used for platform detection.
    url: String,

    /// Saved HTML of the page.
    html_path: PathBuf,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON record.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => ExtractorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExtractorConfig::from_env().context("Failed to read environment overrides")?,
    };
    init_logging_with_config(&config.logging)?;

    let html = std::fs::read_to_string(&args.html_path)
        .with_context(|| format!("Failed to read {}", args.html_path.display()))?;
    info!("Extracting {} ({} bytes)", args.url, html.len());

    let page = PageHandle::parse(args.url, &html);
    let record = ProductExtractor::new(&config).extract(&page);

    if !record.has_core_data() {
        warn!("Could not extract product information - page structure may have changed");
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{}", json);
    Ok(())
}
