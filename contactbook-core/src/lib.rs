// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contactbook Core Library
//!
//! Contact records, the client-side cache, and optimistic synchronization
//! against a remote contact store.

pub mod cache;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod events;
pub mod export;
pub mod notify;
pub mod sync;
pub mod view;

pub use cache::{ClientCache, FetchTicket, QueryKey, RollbackHandle};
#[cfg(feature = "http")]
pub use client::HttpContactService;
pub use client::{ContactService, MockContactService, ServiceCall, ServiceError, ServiceResult};
pub use config::ClientConfig;
pub use contact::{
    validate_draft, validate_patch, Contact, ContactDraft, ContactPatch, FieldError,
    ValidationError, ValidationErrors, TEMP_ID_PREFIX,
};
pub use error::{ContactbookError, ContactbookResult};
pub use events::{CallbackHandler, ContactEvent, EventDispatcher, EventHandler};
pub use export::{contacts_to_csv, write_csv};
pub use notify::{Notification, NotificationQueue, Notifier, RecordingNotifier, Severity};
pub use sync::{
    Mutation, MutationKind, SyncController, Transaction, TransactionOutcome, TransactionState,
    FETCH_FAILED_MESSAGE,
};
pub use view::{filter_contacts, paginate, ModalState, Page, ThemeMode, ViewState};
