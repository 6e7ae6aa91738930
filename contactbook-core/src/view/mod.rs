// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! View State
//!
//! Search, filter and pagination parameters, theme, and modal visibility.
//! `ViewState` is a plain value owned by the front-end and passed to
//! whatever needs it.

pub mod debounce;
pub mod query;

pub use debounce::{debounce, Debouncer};
pub use query::{filter_contacts, matches_search, paginate, Page};

use crate::contact::Contact;

/// Page sizes offered to the user.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Default page size.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

/// What the contact dialog is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    /// Empty form for a new contact.
    Create,
    /// Form prefilled with the selected contact.
    Edit(Contact),
}

/// Front-end state outside the contact cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search_query: String,
    favourites_only: bool,
    page: usize,
    rows_per_page: usize,
    theme: ThemeMode,
    modal: ModalState,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            search_query: String::new(),
            favourites_only: false,
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            theme: ThemeMode::default(),
            modal: ModalState::default(),
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Sets the (settled) search query and returns to the first page.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.page = 0;
    }

    pub fn favourites_only(&self) -> bool {
        self.favourites_only
    }

    /// Sets the favourites filter and returns to the first page.
    pub fn set_favourites_only(&mut self, favourites_only: bool) {
        self.favourites_only = favourites_only;
        self.page = 0;
    }

    pub fn toggle_favourites_only(&mut self) {
        self.set_favourites_only(!self.favourites_only);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Sets the page size and returns to the first page.
    ///
    /// Sizes outside [`ROWS_PER_PAGE_OPTIONS`] fall back to the default.
    pub fn set_rows_per_page(&mut self, rows: usize) {
        self.rows_per_page = if ROWS_PER_PAGE_OPTIONS.contains(&rows) {
            rows
        } else {
            DEFAULT_ROWS_PER_PAGE
        };
        self.page = 0;
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    /// Flips between light and dark. `System` resolves to dark.
    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            ThemeMode::Light | ThemeMode::System => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    /// Opens the dialog to edit `contact`, or to create one when `None`.
    pub fn open_contact_modal(&mut self, contact: Option<Contact>) {
        self.modal = match contact {
            Some(contact) => ModalState::Edit(contact),
            None => ModalState::Create,
        };
    }

    pub fn close_contact_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal != ModalState::Closed
    }

    /// The contact being edited, if any.
    pub fn selected_contact(&self) -> Option<&Contact> {
        match &self.modal {
            ModalState::Edit(contact) => Some(contact),
            _ => None,
        }
    }

    /// Clears search, filter, page and dialog; keeps theme and page size.
    pub fn reset(&mut self) {
        self.search_query.clear();
        self.favourites_only = false;
        self.page = 0;
        self.modal = ModalState::Closed;
    }

    /// Filters and paginates `contacts` with the current parameters.
    pub fn apply(&self, contacts: &[Contact]) -> Page<Contact> {
        let filtered = filter_contacts(contacts, &self.search_query, self.favourites_only);
        paginate(&filtered, self.page, self.rows_per_page)
    }
}
