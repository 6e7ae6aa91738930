// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Optimistic Transactions
//!
//! One transaction per mutating user action. States move strictly forward:
//!
//! ```text
//! Idle -> OptimisticApplied -> Confirmed  -> Settled
//!                           \-> RolledBack -/
//! ```

use std::fmt;

use crate::cache::RollbackHandle;
use crate::client::ServiceError;
use crate::contact::{Contact, ContactDraft, ContactPatch};
use crate::error::{ContactbookError, ContactbookResult};

/// A mutating user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Create a contact from a draft.
    Create(ContactDraft),
    /// Replace the patched fields of a contact.
    Update { id: String, patch: ContactPatch },
    /// Flip the favourite flag. Carries the contact as the user saw it.
    ToggleFavourite(Contact),
    /// Remove a contact.
    Delete(String),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create(_) => MutationKind::Create,
            Mutation::Update { .. } => MutationKind::Update,
            Mutation::ToggleFavourite(_) => MutationKind::ToggleFavourite,
            Mutation::Delete(_) => MutationKind::Delete,
        }
    }

    /// Id of the targeted contact; `None` for creates.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Mutation::Create(_) => None,
            Mutation::Update { id, .. } => Some(id),
            Mutation::ToggleFavourite(contact) => Some(&contact.id),
            Mutation::Delete(id) => Some(id),
        }
    }
}

/// What a transaction does, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    ToggleFavourite,
    Delete,
}

impl MutationKind {
    /// Generic text shown when the transaction fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "Failed to create contact",
            MutationKind::Update | MutationKind::ToggleFavourite => "Failed to update contact",
            MutationKind::Delete => "Failed to delete contact",
        }
    }

    /// Text shown on success; favourite toggles are silent.
    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            MutationKind::Create => Some("Contact created"),
            MutationKind::Update => Some("Contact updated"),
            MutationKind::ToggleFavourite => None,
            MutationKind::Delete => Some("Contact deleted"),
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::ToggleFavourite => "toggle-favourite",
            MutationKind::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Idle,
    OptimisticApplied,
    Confirmed,
    RolledBack,
    Settled,
}

impl TransactionState {
    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: TransactionState) -> bool {
        use TransactionState::*;
        matches!(
            (self, next),
            (Idle, OptimisticApplied)
                | (OptimisticApplied, Confirmed)
                | (OptimisticApplied, RolledBack)
                | (Confirmed, Settled)
                | (RolledBack, Settled)
        )
    }
}

/// An in-flight optimistic transaction.
#[derive(Debug)]
pub struct Transaction {
    id: u64,
    mutation: Mutation,
    state: TransactionState,
    pub(crate) handle: Option<RollbackHandle>,
    pub(crate) provisional_id: Option<String>,
    pub(crate) contact: Option<Contact>,
    pub(crate) error: Option<ServiceError>,
    pub(crate) restored: bool,
}

impl Transaction {
    pub(crate) fn new(id: u64, mutation: Mutation) -> Self {
        Transaction {
            id,
            mutation,
            state: TransactionState::Idle,
            handle: None,
            provisional_id: None,
            contact: None,
            error: None,
            restored: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    pub fn kind(&self) -> MutationKind {
        self.mutation.kind()
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Placeholder id of the provisional record (creates only).
    pub fn provisional_id(&self) -> Option<&str> {
        self.provisional_id.as_deref()
    }

    pub(crate) fn transition(&mut self, next: TransactionState) -> ContactbookResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(ContactbookError::InvalidState(format!(
                "transaction {} cannot move from {:?} to {:?}",
                self.id, self.state, next
            )));
        }
        self.state = next;
        Ok(())
    }

    pub(crate) fn into_outcome(self) -> TransactionOutcome {
        TransactionOutcome {
            kind: self.mutation.kind(),
            confirmed: self.error.is_none(),
            contact: self.contact,
            error: self.error,
            restored: self.restored,
        }
    }
}

/// Result of a settled transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub kind: MutationKind,
    /// True if the store accepted the mutation.
    pub confirmed: bool,
    /// The authoritative record returned by the store, if any.
    pub contact: Option<Contact>,
    /// The store error, for rolled-back transactions.
    pub error: Option<ServiceError>,
    /// For rolled-back transactions: whether the cache was restored.
    pub restored: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_machine_only_moves_forward() {
        use TransactionState::*;
        assert!(Idle.can_transition_to(OptimisticApplied));
        assert!(OptimisticApplied.can_transition_to(Confirmed));
        assert!(OptimisticApplied.can_transition_to(RolledBack));
        assert!(Confirmed.can_transition_to(Settled));
        assert!(RolledBack.can_transition_to(Settled));

        assert!(!Idle.can_transition_to(Confirmed));
        assert!(!Confirmed.can_transition_to(RolledBack));
        assert!(!Settled.can_transition_to(Idle));
        assert!(!OptimisticApplied.can_transition_to(Settled));
    }

    #[test]
    fn test_invalid_transition_is_an_error() {
        let mut tx = Transaction::new(1, Mutation::Delete("1".into()));
        assert!(tx.transition(TransactionState::Settled).is_err());
        assert_eq!(tx.state(), TransactionState::Idle);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            MutationKind::ToggleFavourite.failure_message(),
            "Failed to update contact"
        );
        assert_eq!(MutationKind::ToggleFavourite.success_message(), None);
        assert_eq!(MutationKind::Create.success_message(), Some("Contact created"));
    }
}
