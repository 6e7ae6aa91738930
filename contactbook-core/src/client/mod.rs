// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Service Client
//!
//! Typed access to the remote contact store. Implementations never retry
//! and never recover from failures; every error is handed back to the
//! caller as a [`ServiceError`].
//!
//! - [`HttpContactService`] talks to the store over HTTP (feature `http`).
//! - [`MockContactService`] keeps contacts in memory for tests and demos.

mod error;
#[cfg(feature = "http")]
mod http;
mod mock;

pub use error::{ServiceError, ServiceResult};
#[cfg(feature = "http")]
pub use http::HttpContactService;
pub use mock::{MockContactService, ServiceCall};

use async_trait::async_trait;

use crate::contact::{Contact, ContactDraft, ContactPatch};

/// Operations offered by the remote contact store.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Fetches every contact, in store order.
    async fn list(&self) -> ServiceResult<Vec<Contact>>;

    /// Fetches a single contact by id.
    async fn get(&self, id: &str) -> ServiceResult<Contact>;

    /// Creates a contact; the store assigns the id.
    async fn create(&self, draft: &ContactDraft) -> ServiceResult<Contact>;

    /// Replaces the fields present in `patch` on the contact `id`.
    async fn update(&self, id: &str, patch: &ContactPatch) -> ServiceResult<Contact>;

    /// Deletes the contact `id`.
    async fn remove(&self, id: &str) -> ServiceResult<()>;

    /// Flips the favourite flag of `contact`.
    async fn toggle_favourite(&self, contact: &Contact) -> ServiceResult<Contact> {
        self.update(&contact.id, &ContactPatch::favourite(!contact.favourite))
            .await
    }
}
