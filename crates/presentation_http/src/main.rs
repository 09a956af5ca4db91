//! Transit gateway HTTP server
//!
//! Main entry point exposing the transit query facade over HTTP.

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, build_query_facade, init_telemetry};
use presentation_http::{routes, serve_with_shutdown, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Transit query gateway
#[derive(Debug, Parser)]
#[command(name = "transit-gateway", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "TRANSIT_GATEWAY_SERVER_PORT")]
    port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "TRANSIT_GATEWAY_SERVER_HOST")]
    host: Option<String>,

    /// Configuration file (defaults to ./config.toml if present)
    #[arg(short, long, env = "TRANSIT_GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_str().context("config path is not valid UTF-8")?;
            AppConfig::load_from(path, true)?
        },
        None => AppConfig::load()?,
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    init_telemetry(&config.telemetry)?;
    info!("Transit gateway v{} starting...", env!("CARGO_PKG_VERSION"));

    let facade = build_query_facade(&config).context("failed to set up providers")?;
    info!(
        providers = ?facade.list_provider_ids(),
        default = %facade.registry().default_id(),
        "Providers registered"
    );

    let app = routes::create_router_with_body_limit(
        AppState::new(facade),
        config.server.max_body_size_json_bytes,
    )
    .layer(TraceLayer::new_for_http());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Gateway listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let outcome = serve_with_shutdown(listener, app, shutdown_signal(), shutdown_timeout).await?;

    info!(?outcome, "Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
