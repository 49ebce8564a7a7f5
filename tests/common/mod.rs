#![allow(dead_code)]

use serde_json::{json, Value};
use userdesk::connectors::{AdminServiceClient, AdminServiceConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wire shape of a user as the admin API returns it.
pub fn user_json(id: i64, login: &str) -> Value {
    json!({
        "id": id,
        "login": login,
        "firstName": capitalize(login),
        "lastName": "Example",
        "email": format!("{}@example.com", login),
        "activated": true,
        "role": "User"
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn config_for(server: &MockServer) -> AdminServiceConfig {
    AdminServiceConfig::with_base_url(&server.uri())
}

pub fn client_for(server: &MockServer) -> AdminServiceClient {
    AdminServiceClient::new(config_for(server)).expect("client builds")
}

/// Mount `GET /api/account` answering with the given authorities.
pub async fn mount_account(server: &MockServer, authorities: &[&str], times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "admin",
            "authorities": authorities,
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount the fixed first-page list request.
pub async fn mount_user_page(server: &MockServer, users: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .and(query_param("sort", "id,asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users))
        .expect(times)
        .mount(server)
        .await;
}
