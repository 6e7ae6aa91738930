// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Controller
//!
//! Runs each mutating user action as an optimistic transaction against the
//! client cache, with deferred confirmation from the contact store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{ClientCache, QueryKey};
use crate::client::{ContactService, ServiceError, ServiceResult};
use crate::contact::{validate_draft, validate_patch, Contact, ContactDraft, ContactPatch};
use crate::error::{ContactbookError, ContactbookResult};
use crate::events::{ContactEvent, EventDispatcher};
use crate::notify::{Notifier, Severity};

use super::transaction::{Mutation, MutationKind, Transaction, TransactionOutcome, TransactionState};

/// Message shown when loading the contact list fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch contacts";

/// Coordinates the cache, the contact service and the notification channel.
///
/// The controller is the only writer of the cache. The transition methods
/// ([`begin`](Self::begin), [`confirm`](Self::confirm),
/// [`fail`](Self::fail), [`settle`](Self::settle)) are public so callers can
/// interleave transactions; the `create`/`update`/`toggle_favourite`/`delete`
/// helpers run one transaction end to end.
pub struct SyncController<S: ContactService> {
    service: S,
    cache: ClientCache,
    notifier: Arc<dyn Notifier>,
    events: Arc<EventDispatcher>,
    next_transaction: AtomicU64,
}

impl<S: ContactService> SyncController<S> {
    /// Creates a new SyncController with an empty cache.
    pub fn new(service: S, notifier: Arc<dyn Notifier>, events: Arc<EventDispatcher>) -> Self {
        let cache = ClientCache::new(events.clone());
        Self::with_cache(service, cache, notifier, events)
    }

    /// Creates a SyncController over an existing cache.
    pub fn with_cache(
        service: S,
        cache: ClientCache,
        notifier: Arc<dyn Notifier>,
        events: Arc<EventDispatcher>,
    ) -> Self {
        SyncController {
            service,
            cache,
            notifier,
            events,
            next_transaction: AtomicU64::new(1),
        }
    }

    /// The contact service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The client cache (read access for the view).
    pub fn cache(&self) -> &ClientCache {
        &self.cache
    }

    /// The current "all contacts" snapshot.
    pub fn snapshot(&self) -> Vec<Contact> {
        self.cache.snapshot()
    }

    /// Looks a contact up in the current snapshot.
    pub fn find(&self, id: &str) -> Option<Contact> {
        self.cache.snapshot().into_iter().find(|c| c.id == id)
    }

    // -- queries --

    /// Fetches the contact list and stores it unless a newer fetch or
    /// mutation started meanwhile.
    pub async fn refresh(&self) -> ContactbookResult<Vec<Contact>> {
        let ticket = self.cache.begin_fetch(QueryKey::AllContacts);
        match self.service.list().await {
            Ok(contacts) => {
                self.cache.complete_fetch(ticket, contacts);
                Ok(self.cache.snapshot())
            }
            Err(e) => {
                warn!("failed to fetch contacts: {}", e);
                self.notifier.notify(FETCH_FAILED_MESSAGE, Severity::Error);
                Err(e.into())
            }
        }
    }

    /// Returns the snapshot, fetching first if it is absent or stale.
    pub async fn load(&self) -> ContactbookResult<Vec<Contact>> {
        if self.cache.is_stale(QueryKey::AllContacts) {
            self.refresh().await
        } else {
            Ok(self.cache.snapshot())
        }
    }

    // -- transaction steps --

    /// Validates the mutation and applies it optimistically.
    ///
    /// The view can re-render from the cache as soon as this returns.
    pub fn begin(&self, mutation: Mutation) -> ContactbookResult<Transaction> {
        match &mutation {
            Mutation::Create(draft) => validate_draft(draft)?,
            Mutation::Update { patch, .. } => validate_patch(patch)?,
            Mutation::ToggleFavourite(_) | Mutation::Delete(_) => {}
        }

        let id = self.next_transaction.fetch_add(1, Ordering::Relaxed);
        let mut tx = Transaction::new(id, mutation);

        let handle = match tx.mutation().clone() {
            Mutation::Create(draft) => {
                let provisional = Contact::provisional(draft);
                tx.provisional_id = Some(provisional.id.clone());
                self.cache
                    .mutate_optimistically(QueryKey::AllContacts, move |current| {
                        let mut next = current.to_vec();
                        next.push(provisional);
                        next
                    })
            }
            Mutation::Update { id, patch } => {
                self.cache
                    .mutate_optimistically(QueryKey::AllContacts, |current| {
                        current
                            .iter()
                            .map(|c| if c.id == id { c.patched(&patch) } else { c.clone() })
                            .collect()
                    })
            }
            Mutation::ToggleFavourite(contact) => {
                let favourite = !contact.favourite;
                self.cache
                    .mutate_optimistically(QueryKey::AllContacts, |current| {
                        current
                            .iter()
                            .map(|c| {
                                let mut c = c.clone();
                                if c.id == contact.id {
                                    c.favourite = favourite;
                                }
                                c
                            })
                            .collect()
                    })
            }
            Mutation::Delete(id) => self
                .cache
                .mutate_optimistically(QueryKey::AllContacts, |current| {
                    current.iter().filter(|c| c.id != id).cloned().collect()
                }),
        };

        tx.handle = Some(handle);
        tx.transition(TransactionState::OptimisticApplied)?;
        debug!(transaction = tx.id(), kind = %tx.kind(), "optimistic update applied");
        Ok(tx)
    }

    /// Merges the store's authoritative response into the cache.
    ///
    /// `response` is the record returned by the store; deletes pass `None`.
    pub fn confirm(&self, tx: &mut Transaction, response: Option<Contact>) -> ContactbookResult<()> {
        self.merge_confirmed(tx, response)?;
        if let Some(message) = tx.kind().success_message() {
            self.notifier.notify(message, Severity::Success);
        }
        Ok(())
    }

    fn merge_confirmed(&self, tx: &mut Transaction, response: Option<Contact>) -> ContactbookResult<()> {
        tx.transition(TransactionState::Confirmed)?;

        match (tx.mutation().clone(), response) {
            (Mutation::Create(_), Some(created)) => {
                let provisional_id = tx.provisional_id.clone();
                let merged = created.clone();
                self.cache.write_with(QueryKey::AllContacts, move |current| {
                    replace_provisional(current, provisional_id.as_deref(), merged)
                });
                self.events.dispatch(ContactEvent::ContactAdded {
                    contact_id: created.id.clone(),
                });
                tx.contact = Some(created);
            }
            (Mutation::Update { patch, .. }, Some(updated)) => {
                self.replace_record(updated.clone());
                self.events.dispatch(ContactEvent::ContactUpdated {
                    contact_id: updated.id.clone(),
                    changed_fields: patch.changed_fields(),
                });
                tx.contact = Some(updated);
            }
            (Mutation::ToggleFavourite(_), Some(updated)) => {
                self.replace_record(updated.clone());
                self.events.dispatch(ContactEvent::ContactUpdated {
                    contact_id: updated.id.clone(),
                    changed_fields: vec!["favourite".to_string()],
                });
                tx.contact = Some(updated);
            }
            (Mutation::Delete(id), _) => {
                // The optimistic removal already matches the store
                self.events
                    .dispatch(ContactEvent::ContactRemoved { contact_id: id });
            }
            (mutation, None) => {
                warn!(
                    transaction = tx.id(),
                    kind = %mutation.kind(),
                    "store confirmed without a record; waiting for refetch"
                );
            }
        }

        debug!(transaction = tx.id(), "transaction confirmed");
        Ok(())
    }

    /// Reverts the optimistic write and raises one error notification.
    ///
    /// A delete that fails with `NotFound` already reached its goal. It is
    /// confirmed silently: no rollback and no message.
    pub fn fail(&self, tx: &mut Transaction, error: ServiceError) -> ContactbookResult<()> {
        if tx.kind() == MutationKind::Delete && error.is_not_found() {
            debug!(transaction = tx.id(), "contact already gone, treating delete as confirmed");
            return self.merge_confirmed(tx, None);
        }

        tx.transition(TransactionState::RolledBack)?;

        let restored = match tx.handle.take() {
            Some(handle) => self.cache.rollback(handle),
            None => false,
        };
        warn!(
            transaction = tx.id(),
            kind = %tx.kind(),
            restored,
            "transaction failed: {}",
            error
        );

        tx.restored = restored;
        tx.error = Some(error);
        self.notifier
            .notify(tx.kind().failure_message(), Severity::Error);
        self.events.dispatch(ContactEvent::TransactionRolledBack {
            kind: tx.kind(),
            restored,
        });
        Ok(())
    }

    /// Routes a store result to [`confirm`](Self::confirm) or [`fail`](Self::fail).
    pub fn complete(
        &self,
        tx: &mut Transaction,
        result: ServiceResult<Option<Contact>>,
    ) -> ContactbookResult<()> {
        match result {
            Ok(response) => self.confirm(tx, response),
            Err(error) => self.fail(tx, error),
        }
    }

    /// Invalidates the contact list and refetches it to reconcile drift.
    ///
    /// A failed refetch leaves the snapshot stale; it is logged rather than
    /// notified so a transaction never produces two messages.
    pub async fn settle(&self, mut tx: Transaction) -> ContactbookResult<TransactionOutcome> {
        tx.transition(TransactionState::Settled)?;
        self.cache.invalidate(QueryKey::AllContacts);

        let ticket = self.cache.begin_fetch(QueryKey::AllContacts);
        match self.service.list().await {
            Ok(contacts) => {
                self.cache.complete_fetch(ticket, contacts);
            }
            Err(e) => warn!(transaction = tx.id(), "refetch after settle failed: {}", e),
        }

        debug!(transaction = tx.id(), "transaction settled");
        Ok(tx.into_outcome())
    }

    /// Sends the mutation to the store.
    pub async fn execute(&self, mutation: &Mutation) -> ServiceResult<Option<Contact>> {
        match mutation {
            Mutation::Create(draft) => self.service.create(draft).await.map(Some),
            Mutation::Update { id, patch } => self.service.update(id, patch).await.map(Some),
            Mutation::ToggleFavourite(contact) => {
                self.service.toggle_favourite(contact).await.map(Some)
            }
            Mutation::Delete(id) => self.service.remove(id).await.map(|_| None),
        }
    }

    /// Runs one transaction through every state.
    pub async fn run(&self, mutation: Mutation) -> ContactbookResult<TransactionOutcome> {
        let mut tx = self.begin(mutation)?;
        let result = self.execute(tx.mutation()).await;
        self.complete(&mut tx, result)?;
        self.settle(tx).await
    }

    // -- user intents --

    /// Creates a contact.
    pub async fn create(&self, draft: ContactDraft) -> ContactbookResult<TransactionOutcome> {
        self.run(Mutation::Create(draft)).await
    }

    /// Updates the fields present in `patch`.
    pub async fn update(
        &self,
        id: &str,
        patch: ContactPatch,
    ) -> ContactbookResult<TransactionOutcome> {
        self.run(Mutation::Update {
            id: id.to_string(),
            patch,
        })
        .await
    }

    /// Flips the favourite flag of a cached contact.
    pub async fn toggle_favourite(&self, id: &str) -> ContactbookResult<TransactionOutcome> {
        let contact = self
            .find(id)
            .ok_or_else(|| ContactbookError::ContactNotFound(id.to_string()))?;
        self.run(Mutation::ToggleFavourite(contact)).await
    }

    /// Deletes a contact.
    pub async fn delete(&self, id: &str) -> ContactbookResult<TransactionOutcome> {
        self.run(Mutation::Delete(id.to_string())).await
    }

    fn replace_record(&self, updated: Contact) {
        self.cache.write_with(QueryKey::AllContacts, move |current| {
            current
                .iter()
                .map(|c| if c.id == updated.id { updated.clone() } else { c.clone() })
                .collect()
        });
    }
}

/// Swaps the provisional record for the created one, keeping one copy of it.
fn replace_provisional(current: &[Contact], provisional_id: Option<&str>, created: Contact) -> Vec<Contact> {
    let mut next = Vec::with_capacity(current.len() + 1);
    let mut placed = false;

    for contact in current {
        let is_slot = Some(contact.id.as_str()) == provisional_id || contact.id == created.id;
        if !is_slot {
            next.push(contact.clone());
        } else if !placed {
            next.push(created.clone());
            placed = true;
        }
    }

    if !placed {
        next.push(created);
    }
    next
}
