// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP contact client against a live server.

mod common;

use common::start_server;
use contactbook_core::{ContactDraft, ContactPatch, ContactService, ServiceError};
use contactbook_server::ContactStore;

#[tokio::test]
async fn test_list_and_get() {
    let server = start_server().await;
    let client = server.client();

    let contacts = client.list().await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "John Doe");

    let john = client.get("1").await.unwrap();
    assert_eq!(john, contacts[0]);
}

#[tokio::test]
async fn test_create_update_remove() {
    let server = start_server().await;
    let client = server.client();

    let created = client
        .create(&ContactDraft::new("Ann Lee", "ann@example.com", "1234567"))
        .await
        .unwrap();
    assert!(!created.favourite);
    assert_eq!(server.store.count(), 2);

    let updated = client
        .update(&created.id, &ContactPatch::favourite(true))
        .await
        .unwrap();
    assert!(updated.favourite);
    assert_eq!(updated.name, "Ann Lee");

    client.remove(&created.id).await.unwrap();
    assert!(server.store.get(&created.id).is_none());
    // Deleting again is still accepted by the store
    client.remove(&created.id).await.unwrap();
}

#[tokio::test]
async fn test_reserved_characters_stay_in_the_id() {
    let server = start_server().await;
    let client = server.client();

    // "1?force" must not be read as contact "1" with a query string
    assert!(matches!(client.get("1?force").await, Err(ServiceError::NotFound(_))));
    client.remove("1?force").await.unwrap();
    client.remove("../1").await.unwrap();
    assert!(server.store.get("1").is_some());
}

#[tokio::test]
async fn test_missing_contact_is_not_found() {
    let server = start_server().await;
    let client = server.client();

    assert!(matches!(client.get("42").await, Err(ServiceError::NotFound(_))));
    assert!(matches!(
        client.update("42", &ContactPatch::favourite(true)).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_rejected_payload_is_validation_error() {
    let server = start_server().await;
    let client = server.client();

    let err = client
        .create(&ContactDraft::new("A", "ann@example.com", "1234567"))
        .await
        .unwrap_err();

    match err {
        ServiceError::Validation(message) => assert!(message.contains("Name")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_toggle_favourite_round_trip() {
    let server = start_server().await;
    let client = server.client();
    let john = client.get("1").await.unwrap();

    let toggled = client.toggle_favourite(&john).await.unwrap();
    let restored = client.toggle_favourite(&toggled).await.unwrap();

    assert!(toggled.favourite);
    assert!(!restored.favourite);
}
