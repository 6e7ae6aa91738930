// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Configuration

use contactbook_core::ClientConfig;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Contact store URL.
    pub server_url: String,
}

impl CliConfig {
    /// Client settings pointed at the configured server.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default().with_base_url(self.server_url.clone())
    }
}
