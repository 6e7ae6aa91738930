// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display Helpers
//!
//! Terminal output formatting and styling.

use console::style;
use contactbook_core::{Contact, Notification, Page, Severity};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Prints a queued notification with its severity icon.
pub fn notification(notification: &Notification) {
    match notification.severity {
        Severity::Success => success(&notification.text),
        Severity::Error => error(&notification.text),
        Severity::Warning => warning(&notification.text),
        Severity::Info => info(&notification.text),
    }
}

fn favourite_mark(favourite: bool) -> &'static str {
    if favourite {
        "★"
    } else {
        "☆"
    }
}

#[derive(Tabled)]
struct ContactRow<'a> {
    #[tabled(rename = "")]
    favourite: &'static str,
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Email")]
    email: &'a str,
    #[tabled(rename = "Phone")]
    phone: &'a str,
}

/// Renders a page of contacts as a table.
pub fn contacts_table(contacts: &[Contact]) -> String {
    let rows = contacts.iter().map(|c| ContactRow {
        favourite: favourite_mark(c.favourite),
        id: &c.id,
        name: &c.name,
        email: &c.email,
        phone: &c.phone,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Displays one page of contacts with its position.
pub fn display_page(page: &Page<Contact>) {
    println!();
    println!("{}", contacts_table(&page.items));
    println!(
        "  {}",
        style(format!(
            "Page {} of {} · {} contacts · {} per page",
            page.page + 1,
            page.total_pages.max(1),
            page.total,
            page.rows_per_page
        ))
        .dim()
    );
    println!();
}

/// Displays a contact with full details.
pub fn display_contact_details(contact: &Contact) {
    println!();
    println!(
        "  {} {}",
        style(&contact.name).bold().cyan(),
        favourite_mark(contact.favourite)
    );
    println!("  ID: {}", style(&contact.id).dim());
    println!();
    println!("  {:6} {}", style("email").dim(), contact.email);
    println!("  {:6} {}", style("phone").dim(), contact.phone);
    if let Some(updated) = contact.updated_at {
        println!();
        println!(
            "  {}",
            style(format!("Updated {}", updated.format("%Y-%m-%d %H:%M UTC"))).dim()
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use contactbook_core::ContactDraft;

    #[test]
    fn test_table_lists_every_contact() {
        let mut ann = Contact::from_draft(
            "7",
            ContactDraft::new("Ann Lee", "ann@example.com", "1234567"),
        );
        ann.favourite = true;
        let john = Contact::from_draft(
            "1",
            ContactDraft::new("John Doe", "john@example.com", "1234567890"),
        );

        let table = contacts_table(&[ann, john]);

        assert!(table.contains("Ann Lee"));
        assert!(table.contains("john@example.com"));
        assert!(table.contains("★"));
        assert!(table.contains("☆"));
    }
}
