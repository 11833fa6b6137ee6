//! Integration tests for the `roster` CLI binary.
//!
//! Argument parsing, help output and completions run without a server;
//! user commands run against a wiremock users API.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `roster` binary with env isolation.
///
/// Clears all `ROSTER_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn roster_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("roster");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("ROSTER_API_URL")
        .env_remove("ROSTER_OUTPUT")
        .env_remove("ROSTER_INSECURE")
        .env_remove("ROSTER_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn ali() -> Value {
    json!({
        "id": 1,
        "name": "Ali",
        "email": "ali@x.com",
        "address": { "street": "A", "city": "Lahore" }
    })
}

async fn users_api() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ali()])))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = roster_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    roster_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("users").and(predicate::str::contains("config")));
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    roster_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("roster"));
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    roster_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    roster_cmd(home.path())
        .args(["users", "list", "-o", "xml"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();
    roster_cmd(home.path())
        .args(["config", "init", "--api-url", "http://127.0.0.1:9/api"])
        .assert()
        .success();

    roster_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:9/api"));

    roster_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_users_list_json() {
    let server = users_api().await;
    let home = tempfile::tempdir().unwrap();

    let output = roster_cmd(home.path())
        .args(["users", "list", "-o", "json", "--api-url", &server.uri()])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let users: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(users, json!([ali()]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_list_uses_env_url() {
    let server = users_api().await;
    let home = tempfile::tempdir().unwrap();

    roster_cmd(home.path())
        .env("ROSTER_API_URL", server.uri())
        .args(["users", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_update_renders_new_city() {
    let server = users_api().await;
    Mock::given(method("PATCH"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    roster_cmd(home.path())
        .args(["users", "update", "1", "--api-url", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("islamabad").and(predicate::str::contains("Lahore").not()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_delete_failure_rolls_back() {
    let server = users_api().await;
    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let output = roster_cmd(home.path())
        .args(["users", "delete", "1", "-o", "plain", "--api-url", &server.uri()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: Request failed with status code 500"),
        "missing banner in:\n{stderr}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_delete_unknown_id() {
    let server = users_api().await;
    let home = tempfile::tempdir().unwrap();

    roster_cmd(home.path())
        .args(["users", "delete", "99", "--api-url", &server.uri()])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("'99' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_add_lists_created_first() {
    let server = users_api().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11,
            "name": "zara",
            "email": "zara@x.com",
            "address": { "street": "B", "city": "Quetta" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    roster_cmd(home.path())
        .args([
            "users", "add", "--name", "zara", "--email", "zara@x.com", "--street", "B",
            "--city", "Quetta", "-o", "plain", "--api-url", &server.uri(),
        ])
        .assert()
        .success()
        .stdout("11\n1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_screen_load_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    roster_cmd(home.path())
        .args(["users", "screen", "--api-url", &server.uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Request failed with status code 503"));
}
