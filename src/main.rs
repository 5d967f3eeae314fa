//! Payroll invoice HTTP server.
//!
//! Loads the YAML configuration from `PAYROLL_CONFIG_DIR` (default
//! `./config/payroll`) and serves the API on `PORT` (default 8080).

use payroll_invoice::api::{AppState, create_router};
use payroll_invoice::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/payroll";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let config = ConfigLoader::load(&config_dir).map_err(|e| {
        tracing::error!(config_dir = %config_dir, "Configuration load failed: {e}");
        e
    })?;
    tracing::info!(
        config_dir = %config_dir,
        users = config.users().users.len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Payroll invoice API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
