//! API command - runs the prediction service

use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use super::{shutdown_signal, socket_addr};
use crate::api::{create_router, create_router_with_metrics, AppState};
use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::models::ModelRegistry;
use crate::infrastructure::observability::init_metrics;

/// Arguments for the API command
#[derive(Args, Clone, Debug)]
pub struct ApiArgs {
    /// Directory holding the model artifacts (overrides config)
    #[arg(long)]
    pub model_dir: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Load the models and serve predictions until shutdown. Any artifact
/// problem aborts before the listener is bound.
pub async fn run(args: ApiArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    if let Some(dir) = args.model_dir {
        config.models.dir = dir;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_logging(&config.logging, "api")?;

    let registry = ModelRegistry::load(&config.models.dir)?;
    let state = AppState::new(registry);

    let app = match init_metrics(&config.metrics) {
        Some(metrics) => create_router_with_metrics(state, metrics, &config.metrics.path),
        None => create_router(state),
    };

    let addr = socket_addr(&config.server.host, config.server.port)?;
    info!("Starting prediction service on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Prediction service shutdown complete");

    Ok(())
}
