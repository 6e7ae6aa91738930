// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Synchronization
//!
//! Optimistic transactions between the client cache and the contact store.
//!
//! A transaction applies its change to the cache immediately, sends the
//! request, then either merges the store's answer or rolls the cache back.
//! Either way it ends by refetching the contact list. If a newer mutation
//! landed in between, a rollback is skipped rather than clobbering it.

mod controller;
mod transaction;

pub use controller::{SyncController, FETCH_FAILED_MESSAGE};
pub use transaction::{
    Mutation, MutationKind, Transaction, TransactionOutcome, TransactionState,
};
