// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contactbook CLI
//!
//! Command-line front-end for a Contactbook server.

mod commands;
mod config;
mod display;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use commands::contacts::{self, ContactFields, ListOptions};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(version, about = "Manage contacts on a Contactbook server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Contact server URL
    #[arg(
        long,
        global = true,
        env = "CONTACTBOOK_API_URL",
        default_value = "http://localhost:3001"
    )]
    server: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List contacts
    List {
        /// Only contacts whose name, email or phone match
        #[arg(short, long)]
        search: Option<String>,

        /// Only favourites
        #[arg(short, long)]
        favourites: bool,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Contacts per page (5, 10 or 25)
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },

    /// Search interactively, one query per input line
    Search {
        /// Only favourites
        #[arg(short, long)]
        favourites: bool,

        /// Contacts per page (5, 10 or 25)
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },

    /// Show contact details
    Show {
        /// Contact ID
        id: String,
    },

    /// Add a contact (prompts for missing fields)
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Edit a contact (prompts when no field is given)
    Edit {
        /// Contact ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Toggle the favourite flag
    Favourite {
        /// Contact ID
        id: String,
    },

    /// Delete a contact
    Delete {
        /// Contact ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export all contacts to a CSV file
    Export {
        /// Output file path (.csv is appended if missing)
        output: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contactbook=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = CliConfig {
        server_url: cli.server,
    };

    let ok = match cli.command {
        Commands::List {
            search,
            favourites,
            page,
            rows,
        } => {
            let options = ListOptions {
                search,
                favourites,
                page,
                rows,
            };
            contacts::list(&config, &options).await?
        }
        Commands::Search { favourites, rows } => {
            contacts::search(&config, favourites, rows).await?
        }
        Commands::Show { id } => contacts::show(&config, &id).await?,
        Commands::Add { name, email, phone } => {
            contacts::add(&config, ContactFields { name, email, phone }).await?
        }
        Commands::Edit {
            id,
            name,
            email,
            phone,
        } => contacts::edit(&config, &id, ContactFields { name, email, phone }).await?,
        Commands::Favourite { id } => contacts::favourite(&config, &id).await?,
        Commands::Delete { id, yes } => contacts::delete(&config, &id, yes).await?,
        Commands::Export { output } => contacts::export(&config, &output).await?,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "contactbook", &mut io::stdout());
            true
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
