// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error Types
//!
//! Unified error type for the Contactbook library.

use thiserror::Error;

use crate::client::ServiceError;
use crate::contact::ValidationErrors;

/// Unified error type for Contactbook operations.
#[derive(Error, Debug)]
pub enum ContactbookError {
    /// The contact store call failed.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Contact fields failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Contact not present in the cache.
    #[error("contact not found: {0}")]
    ContactNotFound(String),

    /// Invalid operation in current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Filesystem error (export).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Contactbook operations.
pub type ContactbookResult<T> = Result<T, ContactbookError>;
