// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CSV Export
//!
//! Writes the contact snapshot as a spreadsheet-friendly CSV file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::contact::Contact;
use crate::error::ContactbookResult;

/// Header row of the exported file.
pub const CSV_HEADER: &str = "Name,Email,Phone,Favourite";

/// Renders contacts as CSV, one row per contact after the header.
///
/// Lines are separated by `\n` with no trailing newline. Returns an empty
/// string for an empty list.
pub fn contacts_to_csv(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return String::new();
    }

    let rows = contacts.iter().map(|contact| {
        [
            escape_field(&contact.name),
            escape_field(&contact.email),
            escape_field(&contact.phone),
            contact.favourite.to_string(),
        ]
        .join(",")
    });

    std::iter::once(CSV_HEADER.to_string())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes contacts to `path`, appending a `.csv` extension if missing.
///
/// Returns the path actually written.
pub fn write_csv(path: impl AsRef<Path>, contacts: &[Contact]) -> ContactbookResult<PathBuf> {
    let path = with_csv_extension(path.as_ref());
    fs::write(&path, contacts_to_csv(contacts))?;
    info!(count = contacts.len(), path = %path.display(), "exported contacts");
    Ok(path)
}

fn with_csv_extension(path: &Path) -> PathBuf {
    let has_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if has_csv {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".csv");
        PathBuf::from(name)
    }
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("Doe, John"), "\"Doe, John\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_extension() {
        assert_eq!(with_csv_extension(Path::new("out")), PathBuf::from("out.csv"));
        assert_eq!(with_csv_extension(Path::new("out.CSV")), PathBuf::from("out.CSV"));
        assert_eq!(
            with_csv_extension(Path::new("out.txt")),
            PathBuf::from("out.txt.csv")
        );
    }
}
