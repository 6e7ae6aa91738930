// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event System
//!
//! Callbacks the view layer registers to learn when to re-render.

use std::sync::{Arc, RwLock};

use crate::cache::QueryKey;
use crate::sync::MutationKind;

/// Events emitted by the cache and the sync controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEvent {
    /// The snapshot for a query changed (write, optimistic mutation,
    /// rollback, or fetch result).
    SnapshotChanged {
        /// The query whose snapshot changed.
        key: QueryKey,
        /// Entry version after the change.
        version: u64,
    },

    /// The store confirmed a new contact.
    ContactAdded {
        /// The server-assigned contact ID.
        contact_id: String,
    },

    /// The store confirmed an update.
    ContactUpdated {
        /// The contact ID.
        contact_id: String,
        /// Fields that changed.
        changed_fields: Vec<String>,
    },

    /// The store confirmed a removal.
    ContactRemoved {
        /// The contact ID.
        contact_id: String,
    },

    /// A transaction failed and its optimistic write was reverted.
    TransactionRolledBack {
        /// What the transaction was doing.
        kind: MutationKind,
        /// Whether the cache was actually restored (false when superseded).
        restored: bool,
    },

    /// A fetch result arrived after a newer fetch or mutation and was dropped.
    StaleFetchDiscarded {
        /// The query the fetch was for.
        key: QueryKey,
        /// Generation of the discarded fetch.
        generation: u64,
    },
}

/// Event handler trait.
///
/// Implement this trait to receive contact events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: ContactEvent);
}

/// Simple callback-based event handler.
pub struct CallbackHandler<F>
where
    F: Fn(ContactEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(ContactEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(ContactEvent) + Send + Sync,
{
    fn on_event(&self, event: ContactEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
///
/// Handlers can be registered after the dispatcher has been shared with the
/// cache and controller.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&self, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(handler);
    }

    /// Removes all handlers.
    pub fn clear_handlers(&self) {
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: ContactEvent) {
        // Clone the list so handlers may register others without deadlocking
        let handlers = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for handler in &handlers {
            handler.on_event(event.clone());
        }
    }
}
