// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client-side filtering and pagination of the contact snapshot.

use crate::contact::Contact;

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of items across all pages.
    pub total: usize,
    /// Zero-based page index actually returned.
    pub page: usize,
    pub rows_per_page: usize,
    pub total_pages: usize,
}

/// True if `contact` matches `query`.
///
/// Name and email match case-insensitively; phone matches the raw query.
/// An empty query matches everything.
pub fn matches_search(contact: &Contact, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let lower = query.to_lowercase();
    contact.name.to_lowercase().contains(&lower)
        || contact.email.to_lowercase().contains(&lower)
        || contact.phone.contains(query)
}

/// Applies the search query and the favourites-only switch.
pub fn filter_contacts(contacts: &[Contact], query: &str, favourites_only: bool) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|c| matches_search(c, query))
        .filter(|c| !favourites_only || c.favourite)
        .cloned()
        .collect()
}

/// Slices `items` into page `page` of `rows_per_page`.
///
/// Out-of-range pages are clamped to the last page; a zero page size is
/// treated as one row per page.
pub fn paginate<T: Clone>(items: &[T], page: usize, rows_per_page: usize) -> Page<T> {
    let rows_per_page = rows_per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(rows_per_page);
    let page = page.min(total_pages.saturating_sub(1));

    let start = page * rows_per_page;
    let end = (start + rows_per_page).min(total);
    let items = if start < end {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        total,
        page,
        rows_per_page,
        total_pages,
    }
}
