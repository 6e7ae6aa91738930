// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contacts Command
//!
//! List, view, and manage contacts on the server.

use std::path::Path;

use anyhow::Result;
use contactbook_core::contact::{validate_email, validate_name, validate_phone, ValidationError};
use contactbook_core::view::{debounce, ROWS_PER_PAGE_OPTIONS};
use contactbook_core::{
    write_csv, Contact, ContactDraft, ContactPatch, ContactbookError, ContactbookResult,
    TransactionOutcome, ViewState,
};
use dialoguer::{Confirm, Input};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use super::Session;
use crate::config::CliConfig;
use crate::display;

/// Filters for `list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub favourites: bool,
    /// One-based page number.
    pub page: usize,
    pub rows: usize,
}

/// Editable fields given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ContactFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactFields {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Loads the contact list, printing the failure message if it cannot.
async fn load(session: &Session) -> Result<bool> {
    match session.controller.load().await {
        Ok(_) => Ok(true),
        Err(ContactbookError::Service(_)) => {
            session.flush_notifications();
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Prints validation failures field by field; passes other errors on.
fn report(session: &Session, result: ContactbookResult<TransactionOutcome>) -> Result<bool> {
    match result {
        Ok(outcome) => Ok(session.finish(&outcome)),
        Err(ContactbookError::Validation(errors)) => {
            for field in errors.field_errors() {
                display::error(&format!("{}: {}", field.field, field.message));
            }
            Ok(false)
        }
        Err(ContactbookError::ContactNotFound(id)) => {
            display::warning(&format!("Contact '{}' not found", id));
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn prompt(
    label: &str,
    current: Option<&str>,
    validate: fn(&str) -> Result<(), ValidationError>,
) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(label)
        .validate_with(move |value: &String| validate(value).map_err(|e| e.to_string()));
    if let Some(current) = current {
        input = input.with_initial_text(current);
    }
    Ok(input.interact_text()?)
}

/// Lists contacts, filtered and paginated.
pub async fn list(config: &CliConfig, options: &ListOptions) -> Result<bool> {
    let session = Session::open(config)?;
    if !load(&session).await? {
        return Ok(false);
    }

    let mut state = ViewState::new();
    if !ROWS_PER_PAGE_OPTIONS.contains(&options.rows) {
        display::warning(&format!(
            "Unsupported page size {}, using {}",
            options.rows,
            state.rows_per_page()
        ));
    }
    state.set_rows_per_page(options.rows);
    if let Some(query) = &options.search {
        state.set_search_query(query.trim());
    }
    state.set_favourites_only(options.favourites);
    state.set_page(options.page.saturating_sub(1));

    let page = state.apply(&session.controller.snapshot());
    if page.total == 0 {
        if state.search_query().is_empty() && !state.favourites_only() {
            display::info("No contacts yet. Add one using:");
            println!("  contactbook add");
        } else {
            display::info("No contacts match the current filters");
        }
        return Ok(true);
    }

    display::display_page(&page);
    Ok(true)
}

/// Live search: each line read from stdin replaces the query, and the
/// results are printed once the input has been quiet for the debounce delay.
pub async fn search(config: &CliConfig, favourites: bool, rows: usize) -> Result<bool> {
    let session = Session::open(config)?;
    if !load(&session).await? {
        return Ok(false);
    }

    let mut state = ViewState::new();
    state.set_rows_per_page(rows);
    state.set_favourites_only(favourites);

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });

    display::info("Type to search, Ctrl+D to quit");
    let mut settled = debounce(rx, config.client_config().search_debounce);
    while let Some(query) = settled.recv().await {
        debug!(query = %query, "search settled");
        state.set_search_query(query.trim());

        println!();
        println!("Search: \"{}\"", state.search_query());
        let page = state.apply(&session.controller.snapshot());
        if page.total == 0 {
            display::info("No contacts match the current filters");
        } else {
            display::display_page(&page);
        }
    }
    Ok(true)
}

/// Shows details for a specific contact.
pub async fn show(config: &CliConfig, id: &str) -> Result<bool> {
    let session = Session::open(config)?;
    if !load(&session).await? {
        return Ok(false);
    }

    match session.controller.find(id) {
        Some(contact) => {
            display::display_contact_details(&contact);
            Ok(true)
        }
        None => {
            display::warning(&format!("Contact '{}' not found", id));
            Ok(false)
        }
    }
}

/// Creates a contact, prompting for fields not given.
pub async fn add(config: &CliConfig, fields: ContactFields) -> Result<bool> {
    let session = Session::open(config)?;
    if !load(&session).await? {
        return Ok(false);
    }

    let mut state = ViewState::new();
    state.open_contact_modal(None);

    let draft = ContactDraft::new(
        match fields.name {
            Some(name) => name,
            None => prompt("Name", None, validate_name)?,
        },
        match fields.email {
            Some(email) => email,
            None => prompt("Email", None, validate_email)?,
        },
        match fields.phone {
            Some(phone) => phone,
            None => prompt("Phone", None, validate_phone)?,
        },
    );
    state.close_contact_modal();

    report(&session, session.controller.create(draft).await)
}

/// Updates a contact, prompting with its current values when no field is given.
pub async fn edit(config: &CliConfig, id: &str, fields: ContactFields) -> Result<bool> {
    let session = Session::open(config)?;
    if !load(&session).await? {
        return Ok(false);
    }

    let Some(contact) = session.controller.find(id) else {
        display::warning(&format!("Contact '{}' not found", id));
        return Ok(false);
    };

    let patch = if fields.is_empty() {
        let mut state = ViewState::new();
        state.open_contact_modal(Some(contact));
        let patch = match state.selected_contact() {
            Some(current) => prompt_changes(current)?,
            None => ContactPatch::default(),
        };
        state.close_contact_modal();
        patch
    } else {
        ContactPatch {
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            favourite: None,
        }
    };

    if patch.is_empty() {
        display::info("Nothing to change");
        return Ok(true);
    }

    report(&session, session.controller.update(id, patch).await)
}

fn prompt_changes(current: &Contact) -> Result<ContactPatch> {
    let name = prompt("Name", Some(&current.name), validate_name)?;
    let email = prompt("Email", Some(&current.email), validate_email)?;
    let phone = prompt("Phone", Some(&current.phone), validate_phone)?;

    Ok(ContactPatch {
        name: (name != current.name).then_some(name),
        email: (email != current.email).then_some(email),
        phone: (phone != current.phone).then_some(phone),
        favourite: None,
    })
}

/// Flips the favourite flag.
pub async fn favourite(config: &CliConfig, id: &str) -> Result<bool> {
    let session = Session::open(config)?;
    if !load(&session).await? {
        return Ok(false);
    }

    let accepted = report(&session, session.controller.toggle_favourite(id).await)?;

    // Toggles raise no message of their own
    if let Some(contact) = session.controller.find(id).filter(|_| accepted) {
        if contact.favourite {
            display::success(&format!("{} added to favourites", contact.name));
        } else {
            display::success(&format!("{} removed from favourites", contact.name));
        }
    }
    Ok(accepted)
}

/// Deletes a contact after confirmation.
pub async fn delete(config: &CliConfig, id: &str, yes: bool) -> Result<bool> {
    let session = Session::open(config)?;
    if !load(&session).await? {
        return Ok(false);
    }

    let name = session
        .controller
        .find(id)
        .map(|c| c.name)
        .unwrap_or_else(|| id.to_string());

    if !yes {
        let confirm = Confirm::new()
            .with_prompt(format!("Delete {}?", name))
            .default(false)
            .interact()?;
        if !confirm {
            display::info("Delete cancelled.");
            return Ok(true);
        }
    }

    report(&session, session.controller.delete(id).await)
}

/// Writes every contact to a CSV file.
pub async fn export(config: &CliConfig, output: &Path) -> Result<bool> {
    let session = Session::open(config)?;
    if session.controller.refresh().await.is_err() {
        session.flush_notifications();
        return Ok(false);
    }

    let contacts = session.controller.snapshot();
    if contacts.is_empty() {
        display::info("No contacts to export");
        return Ok(true);
    }

    let path = write_csv(output, &contacts)?;
    display::success(&format!(
        "Exported {} contacts to {}",
        contacts.len(),
        path.display()
    ));
    Ok(true)
}
