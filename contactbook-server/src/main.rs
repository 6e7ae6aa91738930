// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contactbook Server
//!
//! Serves the contact store over HTTP:
//! - `GET/POST /contacts`
//! - `GET/PATCH/DELETE /contacts/:id`
//! - `GET /health`

use contactbook_server::{run, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contactbook_server=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    info!(
        "Starting Contactbook Server v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Listen address: {}", config.listen_addr);

    if let Err(e) = run(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
