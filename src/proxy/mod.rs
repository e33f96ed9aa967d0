//! # Proxy endpoint
//!
//! Relays a free-text query to the external recommendation service.
//!
//! - `POST /api/recommend` with `{"query": string}`
//! - forwards `GET <upstream>?query=<encoded>&max_results=5`, exactly once
//! - replies `{"results": [...]}` with the upstream `recommendations` as-is
//! - failures reply `{"error": string, "details"?: string}` with 400, the
//!   upstream's own status, or 500
//!
//! Stateless: each request is handled on its own, no caching or retries.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod handler;
pub mod upstream;

use crate::{config::ProxyConfig, error::Result};
use handler::{health_handler, recommend_handler};
use upstream::Upstream;

pub const RECOMMEND_PATH: &str = "/api/recommend";
pub const HEALTH_PATH: &str = "/health";

#[derive(Clone)]
pub struct ProxyState {
    pub upstream: Arc<Upstream>,
}

impl ProxyState {
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            upstream: Arc::new(Upstream::new(
                reqwest::Client::new(),
                config.upstream_url.clone(),
            )),
        }
    }
}

pub fn router(state: ProxyState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(RECOMMEND_PATH, post(recommend_handler))
        .route(HEALTH_PATH, get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` is cancelled.
pub async fn serve_on(
    listener: TcpListener,
    config: &ProxyConfig,
    shutdown: CancellationToken,
) -> Result<()> {
    let app = router(ProxyState::new(config));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    Ok(())
}

/// Bind the configured port and serve until Ctrl+C or SIGTERM.
pub async fn start_server(config: &ProxyConfig) -> Result<()> {
    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    log::info!("Binding to {address}");

    let listener = TcpListener::bind(address).await?;
    log::info!(
        "Proxy running on {address}, relaying to {}",
        config.upstream_url
    );

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        trigger.cancel();
    });

    serve_on(listener, config, shutdown).await?;

    log::info!("Proxy shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        log::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                log::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
