//! PaceLedger - org performance analytics server
//!
//! Main entry point for the HTTP application.

use std::sync::Arc;

use paceledger_app::{router, AppContext};
use paceledger_infra::config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    let dotenv_path = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenv_path {
        Some(path) => info!(path = %path.display(), "loaded .env"),
        None => warn!(".env not found, relying on process environment"),
    }

    let config = config::load()?;
    let ctx = Arc::new(AppContext::new(config)?);
    let bind_addr = ctx.config.server.bind_addr.clone();
    let app = router(ctx);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "PaceLedger listening");
    axum::serve(listener, app).await?;
    Ok(())
}
