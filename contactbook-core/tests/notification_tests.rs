// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for notify
//!
//! The notification queue driven by a real sync controller.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::*;
use contactbook_core::*;

#[tokio::test]
async fn test_failed_transactions_queue_in_order() {
    let queue = Arc::new(NotificationQueue::new(Duration::from_secs(5)));
    let controller = SyncController::new(
        MockContactService::with_contacts(vec![john(), jane()]),
        queue.clone(),
        Arc::new(EventDispatcher::new()),
    );
    controller.refresh().await.unwrap();

    controller.service().inject_error(server_error());
    controller.toggle_favourite("1").await.unwrap();
    controller.service().inject_error(server_error());
    controller.delete("2").await.unwrap();

    let start = Instant::now();
    assert_eq!(
        queue.current(start).map(|n| n.text),
        Some("Failed to update contact".to_string())
    );
    assert_eq!(queue.pending_len(), 1);

    let later = start + Duration::from_secs(5);
    let next = queue.current(later).unwrap();
    assert_eq!(next.text, "Failed to delete contact");
    assert_eq!(next.severity, Severity::Error);

    assert!(queue.current(later + Duration::from_secs(5)).is_none());
    assert!(queue.is_empty());
}

#[test]
fn test_dismiss_shows_next_immediately() {
    let queue = NotificationQueue::new(Duration::from_secs(5));
    queue.notify("Contact created", Severity::Success);
    queue.notify("Failed to delete contact", Severity::Error);
    let now = Instant::now();

    assert_eq!(queue.current(now).unwrap().text, "Contact created");
    queue.dismiss();
    assert_eq!(queue.current(now).unwrap().text, "Failed to delete contact");
}

#[test]
fn test_clear_drops_everything() {
    let queue = NotificationQueue::new(Duration::from_secs(5));
    queue.notify("a", Severity::Info);
    queue.notify("b", Severity::Warning);

    queue.clear();

    assert!(queue.is_empty());
    assert!(queue.drain().is_empty());
}
