// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Generators for valid contacts and contact lists.

use proptest::prelude::*;

use contactbook_core::{Contact, ContactDraft};

/// Valid display names (2 to 50 characters after trimming).
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,12} [A-Z][a-z]{1,12}"
}

pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{3,10}", "[a-z]{2,8}", "[a-z]{2,4}")
        .prop_map(|(user, domain, tld)| format!("{}@{}.{}", user, domain, tld))
}

/// 7 to 15 ASCII digits.
pub fn phone_strategy() -> impl Strategy<Value = String> {
    "[0-9]{7,15}"
}

pub fn contact_strategy() -> impl Strategy<Value = Contact> {
    (
        name_strategy(),
        email_strategy(),
        phone_strategy(),
        any::<bool>(),
    )
        .prop_map(|(name, email, phone, favourite)| {
            let mut contact = Contact::from_draft("", ContactDraft::new(name, email, phone));
            contact.favourite = favourite;
            contact
        })
}

/// Lists with unique sequential ids.
pub fn contacts_strategy(max: usize) -> impl Strategy<Value = Vec<Contact>> {
    prop::collection::vec(contact_strategy(), 0..max).prop_map(|contacts| {
        contacts
            .into_iter()
            .enumerate()
            .map(|(i, mut c)| {
                c.id = (i + 1).to_string();
                c
            })
            .collect()
    })
}
