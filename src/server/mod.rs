use crate::config::Config;
use crate::device::{DdrClient, DeviceResolver};
use crate::origin::OriginClient;
use anyhow::{Context, Result};
use axum::{http::StatusCode, middleware, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod proxy;
pub mod request_id;

pub use error::AppError;
pub use request_id::{RequestId, X_REQUEST_ID};

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Maps user agents to device profiles
    pub resolver: Arc<dyn DeviceResolver>,
    /// Upstream that owns the playlists
    pub origin: Arc<OriginClient>,
}

impl AppContext {
    /// Build the context from configuration; fails if no origin is set.
    pub fn from_config(config: Config) -> Result<Self> {
        let origin = OriginClient::from_config(&config.origin)
            .context("origin.url must be set to start the proxy")?;
        let resolver = DdrClient::from_config(&config.ddr);

        Ok(Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
            origin: Arc::new(origin),
        })
    }
}

/// Create the Axum router
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(proxy::proxy)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::from_config(config)?;
    tracing::info!(
        origin = ctx.origin.base_url(),
        ddr = %ctx.config.ddr.url,
        "Proxying playlists"
    );

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let name = shutdown_signal().await;
            tracing::info!(signal = name, "Draining connections");
        })
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves with the name of the first termination signal received.
///
/// A signal whose handler cannot be installed never fires.
async fn shutdown_signal() -> &'static str {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
        "SIGINT"
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    }
}
