mod cli;

use anyhow::Context;
use listing_scout::{telemetry, ScoutConfig};
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ScoutConfig::load().context("Invalid configuration")?;

    // Initialize logging
    telemetry::init(&config.log_level)?;

    debug!("🏠 Listing Scout using storage at {}", config.storage_path.display());

    cli::run(config).await
}
