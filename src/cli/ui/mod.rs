//! UI command - runs the dashboard

use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use super::{shutdown_signal, socket_addr};
use crate::config::AppConfig;
use crate::dashboard::{create_dashboard_router, DashboardState, SessionStore};
use crate::infrastructure::client::HttpPredictionClient;
use crate::infrastructure::history::CsvHistoryRepository;
use crate::infrastructure::logging::init_logging;

/// Arguments for the UI command
#[derive(Args, Clone, Debug)]
pub struct UiArgs {
    /// Prediction service URL (overrides config)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Port to serve the dashboard on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// CSV file the prediction history is kept in (overrides config)
    #[arg(long)]
    pub history_file: Option<String>,
}

/// Run the dashboard server
pub async fn run(args: UiArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    let dashboard = &mut config.dashboard;
    if let Some(api_url) = args.api_url {
        dashboard.api_url = api_url;
    }
    if let Some(port) = args.port {
        dashboard.port = port;
    }
    if let Some(history_file) = args.history_file {
        dashboard.history_path = history_file;
    }

    init_logging(&config.logging, "ui")?;

    let dashboard = &config.dashboard;
    let client = HttpPredictionClient::new(
        dashboard.api_url.clone(),
        Duration::from_secs(dashboard.request_timeout_secs),
    )?;
    let history = CsvHistoryRepository::new(&dashboard.history_path);

    let sessions =
        SessionStore::with_idle_timeout(Duration::from_secs(dashboard.session_idle_secs));
    let state = DashboardState::new(Arc::new(client), Arc::new(history), dashboard.api_url.clone())
        .with_sessions(sessions);
    let app = create_dashboard_router(state);

    let addr = socket_addr(&dashboard.host, dashboard.port)?;
    info!(
        api_url = %dashboard.api_url,
        history = %dashboard.history_path,
        "Starting dashboard on {}", addr
    );

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard shutdown complete");

    Ok(())
}
