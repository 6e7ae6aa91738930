// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock Contact Service
//!
//! In-memory implementation of the ContactService trait for testing.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::error::{ServiceError, ServiceResult};
use super::ContactService;
use crate::contact::{Contact, ContactDraft, ContactPatch};

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    List,
    Get(String),
    Create(ContactDraft),
    Update(String, ContactPatch),
    Remove(String),
}

#[derive(Debug, Default)]
struct MockState {
    contacts: Vec<Contact>,
    next_id: u64,
    calls: Vec<ServiceCall>,
    /// Errors returned by the next calls, one per call.
    inject_errors: VecDeque<ServiceError>,
    /// Whether deleting a missing id reports NotFound.
    strict_remove: bool,
}

/// Mock contact store for testing.
///
/// Allows injection of errors and inspection of received calls.
///
/// # Example
///
/// ```ignore
/// let service = MockContactService::with_contacts(vec![john]);
/// service.inject_error(ServiceError::Server { status: 500, message: "boom".into() });
///
/// assert!(service.list().await.is_err());
/// assert_eq!(service.calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockContactService {
    state: Mutex<MockState>,
}

impl MockContactService {
    /// Creates an empty mock store.
    pub fn new() -> Self {
        Self::with_contacts(Vec::new())
    }

    /// Creates a mock store holding `contacts`.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let next_id = contacts.len() as u64 + 1;
        MockContactService {
            state: Mutex::new(MockState {
                contacts,
                next_id,
                ..Default::default()
            }),
        }
    }

    /// Makes deletes of missing ids fail with NotFound instead of succeeding.
    pub fn set_strict_remove(&self, strict: bool) {
        self.lock().strict_remove = strict;
    }

    /// Queues an error to be returned by the next call.
    pub fn inject_error(&self, error: ServiceError) {
        self.lock().inject_errors.push_back(error);
    }

    /// Returns all calls received so far.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.clone()
    }

    /// Clears the call log.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Returns the store contents.
    pub fn contacts(&self) -> Vec<Contact> {
        self.lock().contacts.clone()
    }

    /// Replaces the store contents, e.g. to simulate another client's write.
    pub fn set_contacts(&self, contacts: Vec<Contact>) {
        self.lock().contacts = contacts;
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Records the call and returns the injected error, if any.
    fn record(&self, call: ServiceCall) -> ServiceResult<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.inject_errors.pop_front() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl ContactService for MockContactService {
    async fn list(&self) -> ServiceResult<Vec<Contact>> {
        let state = self.record(ServiceCall::List)?;
        Ok(state.contacts.clone())
    }

    async fn get(&self, id: &str) -> ServiceResult<Contact> {
        let state = self.record(ServiceCall::Get(id.to_string()))?;
        state
            .contacts
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    async fn create(&self, draft: &ContactDraft) -> ServiceResult<Contact> {
        let mut state = self.record(ServiceCall::Create(draft.clone()))?;
        let id = state.next_id.to_string();
        state.next_id += 1;
        let contact = Contact::from_draft(id, draft.clone());
        state.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: &str, patch: &ContactPatch) -> ServiceResult<Contact> {
        let mut state = self.record(ServiceCall::Update(id.to_string(), patch.clone()))?;
        let contact = state
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        contact.apply(patch);
        Ok(contact.clone())
    }

    async fn remove(&self, id: &str) -> ServiceResult<()> {
        let mut state = self.record(ServiceCall::Remove(id.to_string()))?;
        let before = state.contacts.len();
        state.contacts.retain(|c| c.id != id);
        if state.strict_remove && state.contacts.len() == before {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
