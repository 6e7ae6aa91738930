// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client configuration

use std::env;
use std::time::Duration;

use tracing::warn;

/// Environment variable holding the contact store URL.
pub const API_URL_ENV: &str = "CONTACTBOOK_API_URL";

/// Configuration for the contact client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Contact store base URL (e.g., "http://localhost:3001")
    pub base_url: String,

    /// HTTP timeout for requests
    pub request_timeout: Duration,

    /// How long each notification stays on screen
    pub notification_duration: Duration,

    /// Quiet period before a search input settles
    pub search_debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            request_timeout: Duration::from_secs(30),
            notification_duration: Duration::from_secs(5),
            search_debounce: Duration::from_millis(300),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `CONTACTBOOK_API_URL` if set.
    pub fn from_env() -> Self {
        let config = Self::default();
        match env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
            Ok(_) => {
                warn!("{API_URL_ENV} is empty, using default");
                config
            }
            Err(_) => config,
        }
    }

    /// Configure the contact store URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Configure the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Configure the notification display duration
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }
}
