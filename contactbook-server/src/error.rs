// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Errors
//!
//! Maps store failures onto HTTP status codes with a JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contactbook_core::contact::{FieldError, ValidationErrors};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Contact not found")]
    NotFound,

    #[error("Invalid contact: {0}")]
    Validation(ValidationErrors),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Validation(errors) => ApiError::Validation(errors),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        };

        let errors = match &self {
            ApiError::Validation(errors) => errors.field_errors(),
            _ => Vec::new(),
        };

        let body = ErrorBody {
            message: self.to_string(),
            errors,
        };
        (status, Json(body)).into_response()
    }
}
