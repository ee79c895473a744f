//! Mock user directory HTTP backend.
//!
//! Serves a fixed user list, a liveness check, and a diagnostic page echoing
//! request metadata. Typically run several times on different ports behind a
//! reverse proxy or load balancer under test.
//!
//! # Endpoints
//!
//! - `GET /api/users` - Fixed user list tagged with the serving port
//! - `GET /api/health` - Liveness check
//! - `GET /` - HTML page echoing the request's headers, url, and method
//!
//! # Usage
//!
//! ```text
//! mockbackend-service [PORT]
//! ```
//!
//! `PORT` defaults to 3000.
//!
//! # Configuration
//!
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_NAME` - Name attached to the startup log line

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use mockbackend_service_shared::{
    build_router, init_logging, AppState, LoggingConfig, RouteTable, ServiceConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Mock user directory backend")]
struct Cli {
    /// Port to listen on.
    #[arg(value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging_config = LoggingConfig::from_env();
    init_logging(&logging_config).context("failed to initialize logging")?;

    let (config, app) = build_app(&cli)?;
    let app = app.layer(TraceLayer::new_for_http());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(
        service = logging_config.service_name(),
        addr = %addr,
        "Backend server running on port {}",
        config.port
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server terminated unexpectedly")?;

    info!("server shutdown complete");
    Ok(())
}

/// Resolve the configuration from `cli` and build the router serving it.
fn build_app(cli: &Cli) -> Result<(ServiceConfig, Router)> {
    let config = ServiceConfig::from_port_arg(cli.port).context("invalid port argument")?;
    let state = AppState::seeded(config.port);

    info!(
        port = %config.port,
        users = state.directory().len(),
        "application state ready"
    );

    let app = build_router(&RouteTable::standard(), state).context("failed to build router")?;
    Ok((config, app))
}

/// Resolve when the process is asked to stop (Ctrl+C, or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use clap::CommandFactory;
    use tower::ServiceExt;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_port_optional() {
        let cli = Cli::try_parse_from(["mockbackend-service"]).unwrap();
        assert_eq!(cli.port, None);
    }

    #[test]
    fn test_cli_port_positional() {
        let cli = Cli::try_parse_from(["mockbackend-service", "4000"]).unwrap();
        assert_eq!(cli.port, Some(4000));
    }

    #[test]
    fn test_cli_rejects_invalid_ports() {
        assert!(Cli::try_parse_from(["mockbackend-service", "0"]).is_err());
        assert!(Cli::try_parse_from(["mockbackend-service", "70000"]).is_err());
        assert!(Cli::try_parse_from(["mockbackend-service", "http"]).is_err());
    }

    #[tokio::test]
    async fn test_no_port_argument_serves_default_port() {
        let cli = Cli::try_parse_from(["mockbackend-service"]).unwrap();
        let (config, app) = build_app(&cli).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");

        let response = app
            .oneshot(Request::get("/api/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"server":"Backend on port 3000","users":[{"id":1,"name":"Alice"},{"id":2,"name":"Bob"}]}"#
        );
    }

    #[tokio::test]
    async fn test_port_argument_reaches_health_endpoint() {
        let cli = Cli::try_parse_from(["mockbackend-service", "4100"]).unwrap();
        let (_, app) = build_app(&cli).unwrap();

        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"status":"healthy","port":4100}"#
        );
    }
}
