#[macro_use]
extern crate rust_i18n;

mod commands;
mod startup;

use clap::Parser;
use commands::Cli;
use tracing::info;

// Initialize i18n
i18n!("locales", fallback = "en");

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let cli = Cli::parse();
    info!("Starting OneMapan client");

    // Load configuration
    let config = startup::load_config()?;
    rust_i18n::set_locale(&config.locale);

    let ctx = startup::build_context(config)?;
    commands::run(cli, ctx).await?;
    Ok(())
}
