// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contactbook Server
//!
//! The contact store: an in-memory collection served over a small REST API.

pub mod config;
pub mod error;
pub mod http;
pub mod store;

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

pub use config::ServerConfig;
pub use http::{create_router, AppState};
pub use store::{ContactStore, MemoryContactStore};

/// Creates the store described by `config`.
pub fn create_store(config: &ServerConfig) -> Arc<dyn ContactStore> {
    if config.seed {
        Arc::new(MemoryContactStore::seeded())
    } else {
        Arc::new(MemoryContactStore::new())
    }
}

/// CORS policy: the configured origin only, or any origin when unset.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let Some(origin) = &config.cors_origin else {
        return CorsLayer::permissive();
    };

    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE])
            .max_age(Duration::from_secs(60 * 60)),
        Err(e) => {
            warn!("Invalid CORS origin {origin:?}: {e}, allowing any origin");
            CorsLayer::permissive()
        }
    }
}

/// The full application: routes plus CORS.
pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    create_router(state).layer(cors_layer(config))
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
pub async fn run(config: ServerConfig) -> io::Result<()> {
    let store = create_store(&config);
    info!(contacts = store.count(), seeded = config.seed, "store ready");

    let app = build_app(AppState::new(store), &config);
    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    serve(listener, app, shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
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
