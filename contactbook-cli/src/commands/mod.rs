// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Commands

pub mod contacts;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use contactbook_core::{
    EventDispatcher, HttpContactService, NotificationQueue, SyncController, TransactionOutcome,
};
use tracing::debug;

use crate::config::CliConfig;
use crate::display;

/// A sync controller talking to the configured server, with its messages
/// collected in a queue for printing.
pub struct Session {
    pub controller: SyncController<HttpContactService>,
    notifications: Arc<NotificationQueue>,
}

impl Session {
    pub fn open(config: &CliConfig) -> Result<Self> {
        let client_config = config.client_config();
        let service = HttpContactService::new(&client_config)?;
        let notifications = Arc::new(NotificationQueue::new(client_config.notification_duration));
        let events = Arc::new(EventDispatcher::new());
        let controller = SyncController::new(service, notifications.clone(), events);
        debug!(server = %config.server_url, "session opened");

        Ok(Session {
            controller,
            notifications,
        })
    }

    /// Prints every queued notification, oldest first.
    ///
    /// A terminal line stays readable after it is printed, so each message
    /// is dismissed as soon as it is shown and the next one takes its place.
    pub fn flush_notifications(&self) {
        while let Some(notification) = self.notifications.current(Instant::now()) {
            display::notification(&notification);
            self.notifications.dismiss();
        }
    }

    /// Prints the transaction's messages and reports whether it was accepted.
    pub fn finish(&self, outcome: &TransactionOutcome) -> bool {
        self.flush_notifications();
        if let Some(error) = &outcome.error {
            debug!(kind = %outcome.kind, "transaction rolled back: {}", error);
        }
        outcome.confirmed
    }
}
