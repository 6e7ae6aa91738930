// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP Routes
//!
//! CRUD endpoints over the contact store, plus a health check.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use contactbook_core::contact::{Contact, ContactDraft, ContactPatch};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::store::ContactStore;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        AppState {
            store,
            start_time: Instant::now(),
        }
    }
}

/// Health check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub contact_count: usize,
}

/// Creates the router with the contact and health endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/:id",
            get(get_contact).patch(update_contact).delete(delete_contact),
        )
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn list_contacts(State(state): State<AppState>) -> Json<Vec<Contact>> {
    let contacts = state.store.list();
    debug!(count = contacts.len(), "listing contacts");
    Json(contacts)
}

async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    state.store.get(&id).map(Json).ok_or(ApiError::NotFound)
}

async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(draft) = payload.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    let contact = state.store.create(draft)?;
    info!(id = %contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Json(patch) = payload.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    let contact = state.store.update(&id, &patch)?;
    info!(id = %contact.id, fields = ?patch.changed_fields(), "contact updated");
    Ok(Json(contact))
}

/// Deleting an unknown id is a no-op.
async fn delete_contact(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if state.store.remove(&id) {
        info!(id = %id, "contact deleted");
    } else {
        debug!(id = %id, "delete of unknown contact ignored");
    }
    StatusCode::NO_CONTENT
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        contact_count: state.store.count(),
    })
}
