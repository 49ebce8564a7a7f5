//! Integration tests for `userdesk users ...`.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary run from an empty directory so no local configuration or .env leaks in.
fn userdesk_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("userdesk").expect("userdesk binary not found");
    cmd.current_dir(dir.path())
        .env_remove("USERDESK__ADMIN_SERVICE__BASE_URL")
        .env_remove("ADMIN_SERVICE_AUTH_TOKEN");
    cmd
}

#[test]
fn test_users_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .args(["users", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("add"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_prints_table() {
    let server = MockServer::start().await;
    common::mount_account(&server, &["ROLE_ADMIN"], 1).await;
    common::mount_user_page(
        &server,
        json!([common::user_json(1, "alice"), common::user_json(2, "bob")]),
        1,
    )
    .await;
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .args(["--base-url", &server.uri(), "users", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOGIN"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("Bob Example"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json_output() {
    let server = MockServer::start().await;
    common::mount_account(&server, &["ROLE_ADMIN"], 1).await;
    common::mount_user_page(&server, json!([common::user_json(1, "alice")]), 1).await;
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .args(["users", "list", "--json", "--base-url", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"firstName\": \"Alice\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_forbidden_for_non_admin() {
    let server = MockServer::start().await;
    common::mount_account(&server, &["ROLE_USER"], 1).await;
    common::mount_user_page(&server, json!([]), 0).await;
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .args(["--base-url", &server.uri(), "users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You do not have permission"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_base_url_from_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .env("USERDESK__ADMIN_SERVICE__BASE_URL", server.uri())
        .args(["users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch user details"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_terminal_is_declined() {
    let server = MockServer::start().await;
    common::mount_account(&server, &["ROLE_ADMIN"], 1).await;
    common::mount_user_page(&server, json!([common::user_json(1, "alice")]), 1).await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/alice"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .args(["--base-url", &server.uri(), "users", "delete", "alice"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Cancelled"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_flag() {
    let server = MockServer::start().await;
    common::mount_account(&server, &["ROLE_ADMIN"], 1).await;
    common::mount_user_page(&server, json!([common::user_json(1, "alice")]), 1).await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/alice"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .args(["--base-url", &server.uri(), "users", "delete", "alice", "-y"])
        .assert()
        .success()
        .stderr(predicate::str::contains("User deleted successfully."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_creates_user() {
    let server = MockServer::start().await;
    common::mount_account(&server, &["ROLE_ADMIN"], 1).await;
    common::mount_user_page(&server, json!([]), 1).await;
    Mock::given(method("POST"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(common::user_json(2, "carol")))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .args([
            "--base-url",
            &server.uri(),
            "users",
            "add",
            "--name",
            "Carol",
            "--email",
            "carol@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("carol"))
        .stderr(predicate::str::contains("User added successfully."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_rejects_bad_email_without_request() {
    let server = MockServer::start().await;
    common::mount_account(&server, &["ROLE_ADMIN"], 1).await;
    common::mount_user_page(&server, json!([]), 1).await;
    Mock::given(method("POST"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .args([
            "--base-url",
            &server.uri(),
            "users",
            "add",
            "--name",
            "Carol",
            "--email",
            "not-an-email",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Form rejected"));
}

#[test]
fn test_add_rejects_unknown_role() {
    let dir = TempDir::new().unwrap();

    userdesk_cmd(&dir)
        .args([
            "--base-url",
            "http://127.0.0.1:9",
            "users",
            "add",
            "--name",
            "Carol",
            "--email",
            "carol@example.com",
            "--role",
            "owner",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--role"));
}
