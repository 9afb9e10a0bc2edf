//! Disease Screening Service - Main Entry Point

use api::{init_logging, run_server, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("=== Disease Screening Service v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Loading models from {}", config.models.dir.display());

    if let Err(e) = run_server(config).await {
        error!("Service stopped: {}", e);
        return Err(e.into());
    }

    Ok(())
}
