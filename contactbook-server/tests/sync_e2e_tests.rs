// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Optimistic sync against a live server.

mod common;

use std::sync::Arc;

use common::start_server;
use contactbook_core::*;
use contactbook_server::ContactStore;

fn controller(
    service: HttpContactService,
) -> (SyncController<HttpContactService>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = SyncController::new(
        service,
        notifier.clone(),
        Arc::new(EventDispatcher::new()),
    );
    (controller, notifier)
}

#[tokio::test]
async fn test_toggle_favourite_confirmed_by_server() {
    let server = start_server().await;
    let (controller, notifier) = controller(server.client());
    controller.refresh().await.unwrap();

    let outcome = controller.toggle_favourite("1").await.unwrap();

    assert!(outcome.confirmed);
    assert!(controller.find("1").unwrap().favourite);
    assert!(server.store.get("1").unwrap().favourite);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_create_gets_server_id() {
    let server = start_server().await;
    let (controller, _) = controller(server.client());
    controller.refresh().await.unwrap();

    let outcome = controller
        .create(ContactDraft::new("Ann Lee", "ann@example.com", "1234567"))
        .await
        .unwrap();

    let created = outcome.contact.unwrap();
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.iter().any(|c| c.id == created.id));
    assert!(snapshot.iter().all(|c| !c.is_provisional()));
}

#[tokio::test]
async fn test_update_of_contact_deleted_elsewhere_rolls_back() {
    let server = start_server().await;
    let (controller, notifier) = controller(server.client());
    controller.refresh().await.unwrap();
    server.store.remove("1");

    let outcome = controller
        .update(
            "1",
            ContactPatch {
                name: Some("Johnny Doe".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!outcome.confirmed);
    assert_eq!(notifier.messages().len(), 1);
    assert_eq!(notifier.messages()[0].text, "Failed to update contact");
    // The settle refetch reconciles with the store
    assert!(controller.snapshot().is_empty());
}
