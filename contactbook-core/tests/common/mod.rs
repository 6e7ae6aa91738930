// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Fixtures shared across the integration tests.

#![allow(dead_code)]

pub mod strategies;

use std::sync::Arc;

use contactbook_core::*;

/// The contact every scenario starts from.
pub fn john() -> Contact {
    Contact::from_draft(
        "1",
        ContactDraft::new("John Doe", "john@example.com", "1234567890"),
    )
}

pub fn jane() -> Contact {
    let mut jane = Contact::from_draft(
        "2",
        ContactDraft::new("Jane Roe", "jane@example.com", "5550001111"),
    );
    jane.favourite = true;
    jane
}

pub fn draft(name: &str) -> ContactDraft {
    let local = name.to_lowercase().replace(' ', ".");
    ContactDraft::new(name, format!("{}@example.com", local), "7654321")
}

/// A controller over a mock store, plus handles to inspect it.
pub struct Harness {
    pub controller: SyncController<MockContactService>,
    pub notifier: Arc<RecordingNotifier>,
    pub events: Arc<EventDispatcher>,
}

impl Harness {
    pub fn service(&self) -> &MockContactService {
        self.controller.service()
    }

    pub fn error_texts(&self) -> Vec<String> {
        self.notifier
            .with_severity(Severity::Error)
            .into_iter()
            .map(|n| n.text)
            .collect()
    }
}

/// Builds a harness whose store holds `contacts`; the cache starts empty.
pub fn harness(contacts: Vec<Contact>) -> Harness {
    let notifier = Arc::new(RecordingNotifier::new());
    let events = Arc::new(EventDispatcher::new());
    let controller = SyncController::new(
        MockContactService::with_contacts(contacts),
        notifier.clone(),
        events.clone(),
    );
    Harness {
        controller,
        notifier,
        events,
    }
}

/// Builds a harness and loads the store into the cache.
pub async fn loaded_harness(contacts: Vec<Contact>) -> Harness {
    let harness = harness(contacts);
    harness
        .controller
        .refresh()
        .await
        .expect("initial fetch should succeed");
    harness.service().clear_calls();
    harness
}

pub fn server_error() -> ServiceError {
    ServiceError::Server {
        status: 500,
        message: "Internal Server Error".into(),
    }
}
