// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Service Error Types

use thiserror::Error;

/// Errors returned by a [`ContactService`](super::ContactService).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Transport failure; no response was received.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response carrying a server message.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The store rejected the payload.
    #[error("validation error: {0}")]
    Validation(String),

    /// The contact does not exist in the store.
    #[error("contact not found: {0}")]
    NotFound(String),

    /// A success response whose body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Maps a non-success HTTP status and optional server message to an error.
    ///
    /// `subject` names the resource and is used when the server sent no message.
    pub fn from_status(status: u16, message: Option<String>, subject: &str) -> Self {
        match status {
            404 => ServiceError::NotFound(subject.to_string()),
            400 | 422 => {
                ServiceError::Validation(message.unwrap_or_else(|| "invalid payload".to_string()))
            }
            _ => ServiceError::Server {
                status,
                message: message.unwrap_or_else(|| "Something went wrong".to_string()),
            },
        }
    }

    /// Returns true for [`ServiceError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
