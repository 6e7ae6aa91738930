// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Storage
//!
//! In-memory contact collection. Nothing survives a restart.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use contactbook_core::contact::{
    validate_draft, validate_patch, Contact, ContactDraft, ContactPatch, ValidationErrors,
};
use thiserror::Error;

/// Store operation failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("contact not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Contact storage backend.
///
/// Each call is atomic; concurrent writes to the same record are
/// last-write-wins.
pub trait ContactStore: Send + Sync {
    /// All contacts in insertion order.
    fn list(&self) -> Vec<Contact>;

    fn get(&self, id: &str) -> Option<Contact>;

    /// Validates and inserts a new contact with a fresh id.
    fn create(&self, draft: ContactDraft) -> Result<Contact, StoreError>;

    /// Merges `patch` into the contact `id` and validates the result.
    fn update(&self, id: &str, patch: &ContactPatch) -> Result<Contact, StoreError>;

    /// Removes the contact; returns false if it did not exist.
    fn remove(&self, id: &str) -> bool;

    fn count(&self) -> usize;
}

/// The record the store starts with.
pub fn seed_contact() -> Contact {
    let mut contact = Contact::from_draft(
        "1",
        ContactDraft::new("John Doe", "john@example.com", "1234567890"),
    );
    let now = Utc::now();
    contact.created_at = Some(now);
    contact.updated_at = Some(now);
    contact
}

/// In-memory contact store.
#[derive(Default)]
pub struct MemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryContactStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the seed contact.
    pub fn seeded() -> Self {
        Self::with_contacts(vec![seed_contact()])
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        MemoryContactStore {
            contacts: RwLock::new(contacts),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Contact>> {
        self.contacts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Contact>> {
        self.contacts.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl ContactStore for MemoryContactStore {
    fn list(&self) -> Vec<Contact> {
        self.read().clone()
    }

    fn get(&self, id: &str) -> Option<Contact> {
        self.read().iter().find(|c| c.id == id).cloned()
    }

    fn create(&self, draft: ContactDraft) -> Result<Contact, StoreError> {
        validate_draft(&draft)?;

        let mut contact = Contact::from_draft(uuid::Uuid::new_v4().to_string(), draft);
        let now = Utc::now();
        contact.created_at = Some(now);
        contact.updated_at = Some(now);

        self.write().push(contact.clone());
        Ok(contact)
    }

    fn update(&self, id: &str, patch: &ContactPatch) -> Result<Contact, StoreError> {
        validate_patch(patch)?;

        let mut contacts = self.write();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut merged = contact.patched(patch);
        validate_draft(&merged.to_draft())?;
        merged.updated_at = Some(Utc::now());

        *contact = merged.clone();
        Ok(merged)
    }

    fn remove(&self, id: &str) -> bool {
        let mut contacts = self.write();
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        contacts.len() != before
    }

    fn count(&self) -> usize {
        self.read().len()
    }
}
