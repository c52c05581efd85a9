use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod render;
mod routes;
mod services;

use services::{s3_gateway::S3Gateway, storage_service::SharedGateway};

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;
    tracing::info!("Starting bucket-browser with config: {:?}", cfg);

    // --- Initialize the shared S3 client ---
    let gateway: SharedGateway = Arc::new(S3Gateway::from_config(&cfg).await);

    // --- Build router ---
    let app: Router = routes::routes::routes().with_state(gateway);

    // --- Start server ---
    let listener = TcpListener::bind(cfg.addr()).await?;
    tracing::info!("Browse your buckets at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
