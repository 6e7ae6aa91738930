// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Field Validation
//!
//! Rules shared by the client (checked before a transaction starts) and the
//! store (checked before a record is accepted).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::{ContactDraft, ContactPatch};

/// Minimum display name length, in characters.
pub const NAME_MIN_LEN: usize = 2;
/// Maximum display name length, in characters.
pub const NAME_MAX_LEN: usize = 50;
/// Minimum number of phone digits.
pub const PHONE_MIN_DIGITS: usize = 7;
/// Maximum number of phone digits.
pub const PHONE_MAX_DIGITS: usize = 15;

/// Validation error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    EmptyValue { field: &'static str },
    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Phone must contain {min}-{max} digits")]
    InvalidPhone { min: usize, max: usize },
}

impl ValidationError {
    /// The payload field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyValue { field } => field,
            ValidationError::NameTooShort { .. } | ValidationError::NameTooLong { .. } => "name",
            ValidationError::InvalidEmail => "email",
            ValidationError::InvalidPhone { .. } => "phone",
        }
    }
}

/// A single field-level failure, as reported to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All validation failures for one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Field/message pairs suitable for an error response body.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.0
            .iter()
            .map(|e| FieldError {
                field: e.field(),
                message: e.to_string(),
            })
            .collect()
    }

    fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.0.push(e);
        }
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

/// Validates a display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyValue { field: "name" });
    }
    if len < NAME_MIN_LEN {
        return Err(ValidationError::NameTooShort { min: NAME_MIN_LEN });
    }
    if len > NAME_MAX_LEN {
        return Err(ValidationError::NameTooLong { max: NAME_MAX_LEN });
    }
    Ok(())
}

/// Validates email syntax: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmptyValue { field: "email" });
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    // Domain needs a dot with content on both sides
    match domain.rfind('.') {
        Some(dot) if dot > 0 && dot < domain.len() - 1 => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// Validates a phone number: digits only, 7 to 15 of them.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(ValidationError::EmptyValue { field: "phone" });
    }
    let digits_only = phone.chars().all(|c| c.is_ascii_digit());
    if !digits_only || !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&phone.len()) {
        return Err(ValidationError::InvalidPhone {
            min: PHONE_MIN_DIGITS,
            max: PHONE_MAX_DIGITS,
        });
    }
    Ok(())
}

/// Validates every field of a creation payload.
pub fn validate_draft(draft: &ContactDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.check(validate_name(&draft.name));
    errors.check(validate_email(&draft.email));
    errors.check(validate_phone(&draft.phone));
    errors.into_result()
}

/// Validates the fields present in a partial update.
pub fn validate_patch(patch: &ContactPatch) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Some(name) = &patch.name {
        errors.check(validate_name(name));
    }
    if let Some(email) = &patch.email {
        errors.check(validate_email(email));
    }
    if let Some(phone) = &patch.phone {
        errors.check(validate_phone(phone));
    }
    errors.into_result()
}
