// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Starts a live server on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use contactbook_core::{ClientConfig, HttpContactService};
use contactbook_server::{build_app, AppState, ContactStore, MemoryContactStore, ServerConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A running server; stops when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<MemoryContactStore>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> HttpContactService {
        let config = ClientConfig::default().with_base_url(self.base_url());
        HttpContactService::new(&config).expect("client should build")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Starts a server whose store holds the seed contact.
pub async fn start_server() -> TestServer {
    start_with_store(Arc::new(MemoryContactStore::seeded())).await
}

pub async fn start_with_store(store: Arc<MemoryContactStore>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");

    let shared: Arc<dyn ContactStore> = store.clone();
    let app = build_app(AppState::new(shared), &ServerConfig::default());
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = contactbook_server::serve(listener, app, async {
            let _ = rx.await;
        })
        .await;
    });

    TestServer {
        addr,
        store,
        shutdown: Some(tx),
    }
}
