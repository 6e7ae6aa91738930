// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Module
//!
//! The contact record exchanged with the contact store, plus the creation
//! and partial-update payloads.

pub mod validation;

pub use validation::{
    validate_draft, validate_email, validate_name, validate_patch, validate_phone, FieldError,
    ValidationError, ValidationErrors, NAME_MAX_LEN, NAME_MIN_LEN, PHONE_MAX_DIGITS,
    PHONE_MIN_DIGITS,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of ids assigned to provisional records during an optimistic create.
pub const TEMP_ID_PREFIX: &str = "temp-";

/// A contact record.
///
/// `id` is assigned by the store and never changes afterwards. The
/// timestamps are advisory and are not used by any client logic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub favourite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Contact {
    /// Creates a contact from a draft with the given id.
    ///
    /// New contacts always start as non-favourites.
    pub fn from_draft(id: impl Into<String>, draft: ContactDraft) -> Self {
        Contact {
            id: id.into(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            favourite: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Builds the provisional record shown while a create is in flight.
    pub fn provisional(draft: ContactDraft) -> Self {
        Self::from_draft(new_temp_id(), draft)
    }

    /// Returns true if this record carries a client-assigned placeholder id.
    pub fn is_provisional(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }

    /// Applies the fields present in `patch`, leaving the others unchanged.
    pub fn apply(&mut self, patch: &ContactPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(favourite) = patch.favourite {
            self.favourite = favourite;
        }
    }

    /// Returns a copy with `patch` applied.
    pub fn patched(&self, patch: &ContactPatch) -> Self {
        let mut contact = self.clone();
        contact.apply(patch);
        contact
    }

    /// Returns the editable fields as a draft.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Payload for creating a contact. The store assigns `id` and `favourite`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        ContactDraft {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Partial update payload. Absent fields are left untouched by the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favourite: Option<bool>,
}

impl ContactPatch {
    /// Patch that only sets the favourite flag.
    pub fn favourite(favourite: bool) -> Self {
        ContactPatch {
            favourite: Some(favourite),
            ..Default::default()
        }
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.favourite.is_none()
    }

    /// Names of the fields this patch touches.
    pub fn changed_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name".to_string());
        }
        if self.email.is_some() {
            fields.push("email".to_string());
        }
        if self.phone.is_some() {
            fields.push("phone".to_string());
        }
        if self.favourite.is_some() {
            fields.push("favourite".to_string());
        }
        fields
    }
}

/// Generates a placeholder id for a provisional record.
pub fn new_temp_id() -> String {
    format!("{}{}", TEMP_ID_PREFIX, uuid::Uuid::new_v4())
}
