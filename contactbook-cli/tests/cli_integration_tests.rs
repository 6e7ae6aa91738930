// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Integration Tests
//!
//! Runs the `contactbook` binary against an in-process server.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::sync::Arc;

use contactbook_server::{build_app, AppState, ContactStore, MemoryContactStore, ServerConfig};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Runs CLI commands against a freshly seeded server.
struct CliTestContext {
    server_url: String,
    store: Arc<MemoryContactStore>,
}

impl CliTestContext {
    async fn new() -> Self {
        let store = Arc::new(MemoryContactStore::seeded());
        let shared: Arc<dyn ContactStore> = store.clone();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();
        let app = build_app(AppState::new(shared), &ServerConfig::default());

        tokio::spawn(async move {
            let _ = contactbook_server::serve(listener, app, std::future::pending()).await;
        });

        Self {
            server_url: format!("http://{}", addr),
            store,
        }
    }

    /// Run a CLI command and return the output
    async fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_contactbook"));
        cmd.arg("--server").arg(&self.server_url).args(args);
        tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute command"))
            .await
            .unwrap()
    }

    /// Run a CLI command with `input` piped to stdin
    async fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_contactbook"));
        cmd.arg("--server")
            .arg(&self.server_url)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let input = input.to_string();
        tokio::task::spawn_blocking(move || {
            let mut child = cmd.spawn().expect("Failed to execute command");
            child
                .stdin
                .take()
                .unwrap()
                .write_all(input.as_bytes())
                .unwrap();
            child.wait_with_output().unwrap()
        })
        .await
        .unwrap()
    }

    /// Run a command and assert success
    async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        assert!(
            output.status.success(),
            "Command {:?} failed.\nStdout: {}\nStderr: {}",
            args,
            stdout,
            stderr
        );
        stdout
    }

    /// Run a command and assert failure
    async fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        assert!(
            !output.status.success(),
            "Command {:?} should have failed but succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_shows_seed_contact() {
    let ctx = CliTestContext::new().await;

    let output = ctx.run_success(&["list"]).await;

    assert!(output.contains("John Doe"));
    assert!(output.contains("Page 1 of 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_then_search() {
    let ctx = CliTestContext::new().await;

    let output = ctx
        .run_success(&[
            "add",
            "--name",
            "Ann Lee",
            "--email",
            "ann@example.com",
            "--phone",
            "1234567",
        ])
        .await;
    assert!(output.contains("Contact created"));
    assert_eq!(ctx.store.count(), 2);

    let output = ctx.run_success(&["list", "--search", "ann@"]).await;
    assert!(output.contains("Ann Lee"));
    assert!(!output.contains("John Doe"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_prints_only_the_settled_query() {
    let ctx = CliTestContext::new().await;
    ctx.run_success(&[
        "add", "--name", "Ann Lee", "--email", "ann@example.com", "--phone", "1234567",
    ])
    .await;

    // The whole burst arrives well inside the debounce delay
    let output = ctx.run_with_input(&["search"], "j\njo\nann\n").await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout.matches("Search:").count(), 1);
    assert!(stdout.contains("Search: \"ann\""));
    assert!(stdout.contains("Ann Lee"));
    assert!(!stdout.contains("John Doe"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_invalid_reports_fields() {
    let ctx = CliTestContext::new().await;

    let stderr = ctx
        .run_failure(&[
            "add", "--name", "A", "--email", "bad", "--phone", "12",
        ])
        .await;

    assert!(stderr.contains("name:"));
    assert!(stderr.contains("email:"));
    assert!(stderr.contains("phone:"));
    assert_eq!(ctx.store.count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_favourite_and_filter() {
    let ctx = CliTestContext::new().await;

    let output = ctx.run_success(&["favourite", "1"]).await;
    assert!(output.contains("John Doe added to favourites"));
    assert!(ctx.store.get("1").unwrap().favourite);

    let output = ctx.run_success(&["list", "--favourites"]).await;
    assert!(output.contains("John Doe"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_and_delete() {
    let ctx = CliTestContext::new().await;

    let output = ctx.run_success(&["edit", "1", "--name", "Johnny Doe"]).await;
    assert!(output.contains("Contact updated"));
    assert_eq!(ctx.store.get("1").unwrap().name, "Johnny Doe");

    let output = ctx.run_success(&["delete", "1", "--yes"]).await;
    assert!(output.contains("Contact deleted"));
    assert_eq!(ctx.store.count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_contact() {
    let ctx = CliTestContext::new().await;

    let output = ctx.run(&["favourite", "42"]).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Contact '42' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_writes_csv() {
    let ctx = CliTestContext::new().await;
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("contacts");

    let output = ctx
        .run_success(&["export", target.to_str().unwrap()])
        .await;

    assert!(output.contains("Exported 1 contacts"));
    let csv = fs::read_to_string(dir.path().join("contacts.csv")).unwrap();
    assert!(csv.starts_with("Name,Email,Phone,Favourite\nJohn Doe,john@example.com"));
}

#[test]
fn test_unreachable_server_fails_with_one_message() {
    let output = Command::new(env!("CARGO_BIN_EXE_contactbook"))
        .args(["--server", "http://127.0.0.1:9", "list"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Failed to fetch contacts").count(), 1);
}

#[test]
fn test_completions() {
    let output = Command::new(env!("CARGO_BIN_EXE_contactbook"))
        .args(["completions", "bash"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("contactbook"));
}
