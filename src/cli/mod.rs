//! CLI module for the churn predictor
//!
//! - `api`: prediction service
//! - `ui`: interactive dashboard

pub mod api;
pub mod ui;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::info;

/// Churn Predictor - serve pre-trained churn models and track predictions
#[derive(Parser)]
#[command(name = "churn-predictor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the prediction service
    Api(api::ApiArgs),

    /// Run the dashboard
    Ui(ui::UiArgs),
}

/// Resolves on Ctrl+C or SIGTERM
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

pub(crate) fn socket_addr(host: &str, port: u16) -> anyhow::Result<std::net::SocketAddr> {
    Ok(std::net::SocketAddr::from((
        host.parse::<std::net::IpAddr>()?,
        port,
    )))
}
