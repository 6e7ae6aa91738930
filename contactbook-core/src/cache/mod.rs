// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client Cache
//!
//! Process-local cache of the last known contact collection, addressed by
//! query identity. Supports optimistic mutation with a rollback handle and
//! fetch generations so that late responses never overwrite newer state.
//!
//! Every operation takes the internal lock for its whole read-modify-write,
//! so mutations never interleave. Each change bumps the entry's version;
//! a rollback only restores its prior snapshot while the version it
//! produced is still current.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::contact::Contact;
use crate::events::{ContactEvent, EventDispatcher};

/// Identity of a cacheable question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Every contact in the store.
    AllContacts,
}

/// Captures the snapshot replaced by an optimistic mutation.
#[derive(Debug, Clone)]
pub struct RollbackHandle {
    key: QueryKey,
    prior: Option<Vec<Contact>>,
    version: u64,
}

impl RollbackHandle {
    /// The query the mutation applied to.
    pub fn key(&self) -> QueryKey {
        self.key
    }

    /// The snapshot as it was before the mutation.
    pub fn prior(&self) -> &[Contact] {
        self.prior.as_deref().unwrap_or(&[])
    }

    /// The entry version the mutation produced.
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Tag for an in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> QueryKey {
        self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct CacheEntry {
    snapshot: Option<Vec<Contact>>,
    version: u64,
    generation: u64,
    stale: bool,
}

/// Key-addressed snapshot cache.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Clone)]
pub struct ClientCache {
    entries: Arc<Mutex<HashMap<QueryKey, CacheEntry>>>,
    events: Arc<EventDispatcher>,
}

impl ClientCache {
    /// Creates an empty cache that reports changes to `events`.
    pub fn new(events: Arc<EventDispatcher>) -> Self {
        ClientCache {
            entries: Arc::new(Mutex::new(HashMap::new())),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn changed(&self, key: QueryKey, version: u64) {
        self.events
            .dispatch(ContactEvent::SnapshotChanged { key, version });
    }

    /// Returns the current snapshot, or `None` if nothing was ever written.
    pub fn read(&self, key: QueryKey) -> Option<Vec<Contact>> {
        self.lock().get(&key).and_then(|e| e.snapshot.clone())
    }

    /// Returns the "all contacts" snapshot, empty if absent.
    pub fn snapshot(&self) -> Vec<Contact> {
        self.read(QueryKey::AllContacts).unwrap_or_default()
    }

    /// Returns the entry version (0 if the entry does not exist).
    pub fn version(&self, key: QueryKey) -> u64 {
        self.lock().get(&key).map(|e| e.version).unwrap_or(0)
    }

    /// Replaces the snapshot wholesale. Returns the new version.
    pub fn write(&self, key: QueryKey, snapshot: Vec<Contact>) -> u64 {
        self.write_with(key, |_| snapshot)
    }

    /// Replaces the snapshot with `transform(current)` under one lock.
    ///
    /// Returns the new version.
    pub fn write_with<F>(&self, key: QueryKey, transform: F) -> u64
    where
        F: FnOnce(&[Contact]) -> Vec<Contact>,
    {
        let version = {
            let mut entries = self.lock();
            let entry = entries.entry(key).or_default();
            let next = transform(entry.snapshot.as_deref().unwrap_or(&[]));
            entry.snapshot = Some(next);
            entry.version += 1;
            entry.stale = false;
            entry.version
        };
        self.changed(key, version);
        version
    }

    /// Applies `transform` to the current snapshot and stores the result.
    ///
    /// In-flight fetches for `key` are cancelled: their results will be
    /// discarded by [`complete_fetch`](Self::complete_fetch).
    pub fn mutate_optimistically<F>(&self, key: QueryKey, transform: F) -> RollbackHandle
    where
        F: FnOnce(&[Contact]) -> Vec<Contact>,
    {
        let handle = {
            let mut entries = self.lock();
            let entry = entries.entry(key).or_default();
            let prior = entry.snapshot.take();
            let next = transform(prior.as_deref().unwrap_or(&[]));
            entry.snapshot = Some(next);
            entry.version += 1;
            entry.generation += 1;
            RollbackHandle {
                key,
                prior,
                version: entry.version,
            }
        };
        debug!(?key, version = handle.version, "optimistic mutation applied");
        self.changed(key, handle.version);
        handle
    }

    /// Restores the snapshot captured in `handle`.
    ///
    /// Skipped when a newer write or mutation has landed since; returns
    /// whether the snapshot was restored.
    pub fn rollback(&self, handle: RollbackHandle) -> bool {
        let key = handle.key;
        let restored = {
            let mut entries = self.lock();
            match entries.get_mut(&key) {
                Some(entry) if entry.version == handle.version => {
                    entry.snapshot = handle.prior;
                    entry.version += 1;
                    Some(entry.version)
                }
                Some(entry) => {
                    warn!(
                        ?key,
                        handle_version = handle.version,
                        current_version = entry.version,
                        "rollback superseded by a newer write, skipping"
                    );
                    None
                }
                None => None,
            }
        };

        match restored {
            Some(version) => {
                self.changed(key, version);
                true
            }
            None => false,
        }
    }

    /// Starts a fetch, superseding any fetch already in flight for `key`.
    pub fn begin_fetch(&self, key: QueryKey) -> FetchTicket {
        let mut entries = self.lock();
        let entry = entries.entry(key).or_default();
        entry.generation += 1;
        FetchTicket {
            key,
            generation: entry.generation,
        }
    }

    /// Stores a fetch result if its ticket is still the latest one.
    ///
    /// Returns false (and leaves the cache untouched) for stale tickets.
    pub fn complete_fetch(&self, ticket: FetchTicket, snapshot: Vec<Contact>) -> bool {
        let key = ticket.key;
        let version = {
            let mut entries = self.lock();
            let entry = entries.entry(key).or_default();
            if entry.generation != ticket.generation {
                None
            } else {
                entry.snapshot = Some(snapshot);
                entry.version += 1;
                entry.stale = false;
                Some(entry.version)
            }
        };

        match version {
            Some(version) => {
                self.changed(key, version);
                true
            }
            None => {
                debug!(?key, generation = ticket.generation, "discarding stale fetch");
                self.events.dispatch(ContactEvent::StaleFetchDiscarded {
                    key,
                    generation: ticket.generation,
                });
                false
            }
        }
    }

    /// Marks the snapshot as needing a refetch.
    pub fn invalidate(&self, key: QueryKey) {
        if let Some(entry) = self.lock().get_mut(&key) {
            entry.stale = true;
        }
    }

    /// True if the snapshot is absent or was invalidated.
    pub fn is_stale(&self, key: QueryKey) -> bool {
        self.lock()
            .get(&key)
            .map(|e| e.stale || e.snapshot.is_none())
            .unwrap_or(true)
    }
}
