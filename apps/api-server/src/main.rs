//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use api_server::telemetry::{TelemetryConfig, init_telemetry};
use api_server::{AppConfig, run_server};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Blog API Server on {}:{}",
        config.host,
        config.port
    );

    // Actix installs its own signal handlers; wait returns after a graceful stop.
    run_server(config).await?.wait().await
}
