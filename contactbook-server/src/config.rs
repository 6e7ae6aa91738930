// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Server Configuration
//!
//! Read from environment variables; missing or invalid values fall back to
//! defaults with a warning.

use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use tracing::{info, warn};

pub const LISTEN_ADDR_ENV: &str = "CONTACTBOOK_LISTEN_ADDR";
pub const SEED_ENV: &str = "CONTACTBOOK_SEED";
pub const CORS_ORIGIN_ENV: &str = "CONTACTBOOK_CORS_ORIGIN";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
    /// Whether the store starts with the sample contact.
    pub seed: bool,
    /// Single allowed browser origin; any origin when unset.
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            seed: true,
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        ServerConfig {
            listen_addr: try_load(&lookup, LISTEN_ADDR_ENV, DEFAULT_LISTEN_ADDR)
                .unwrap_or(defaults.listen_addr),
            seed: lookup(SEED_ENV)
                .map(|v| parse_flag(SEED_ENV, &v, defaults.seed))
                .unwrap_or(defaults.seed),
            cors_origin: lookup(CORS_ORIGIN_ENV)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim()
        .parse()
        .map_err(|e| warn!("Invalid {key} value {raw:?}: {e}, using default: {default}"))
        .ok()
}

fn parse_flag(key: &str, value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            warn!("Invalid {key} value {other:?}, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), ServerConfig::default());
    }

    #[test]
    fn test_values_are_read() {
        let cfg = config(&[
            (LISTEN_ADDR_ENV, "127.0.0.1:8080"),
            (SEED_ENV, "false"),
            (CORS_ORIGIN_ENV, "http://localhost:5173"),
        ]);
        assert_eq!(cfg.listen_addr, "127.0.0.1:8080".parse().unwrap());
        assert!(!cfg.seed);
        assert_eq!(cfg.cors_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = config(&[(LISTEN_ADDR_ENV, "not-an-addr"), (SEED_ENV, "maybe")]);
        assert_eq!(cfg.listen_addr, ServerConfig::default().listen_addr);
        assert!(cfg.seed);
    }

    #[test]
    fn test_blank_origin_is_unset() {
        assert_eq!(config(&[(CORS_ORIGIN_ENV, "  ")]).cors_origin, None);
    }
}
