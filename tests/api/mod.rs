//! Shared fixtures for the webservice stub tests

mod auth;

use serde_json::{Value, json};
use vtiger_client::{ClientConfig, VtigerClient};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "admin";
pub const ACCESS_KEY: &str = "dSR4CQwHqFcPVkg";
pub const SESSION_NAME: &str = "3a7e1f2b9c4d5e6f";
pub const USER_ID: &str = "19x1";

/// Client pointed at a stub webservice instance.
pub fn test_client(server: &MockServer) -> VtigerClient {
    let _ = env_logger::builder().is_test(true).try_init();
    VtigerClient::new(ClientConfig::new(server.uri(), USERNAME, ACCESS_KEY))
}

/// Canned login response envelope.
pub fn login_response() -> Value {
    json!({
        "success": true,
        "result": {
            "sessionName": SESSION_NAME,
            "userId": USER_ID,
            "version": "0.22",
            "vtigerVersion": "7.5.0"
        }
    })
}

/// Mount challenge and login mocks for a successful handshake.
pub async fn mount_login_mocks(server: &MockServer, challenge_token: &str) {
    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "getchallenge"))
        .and(query_param("username", USERNAME))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "token": challenge_token,
                "serverTime": 1754400000u64,
                "expireTime": 1754400300u64
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/webservice.php"))
        .and(body_string_contains("operation=login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_response()))
        .mount(server)
        .await;
}

/// Log in against the stub and return the ready client.
pub async fn logged_in_client(server: &MockServer) -> VtigerClient {
    let mut client = test_client(server);
    mount_login_mocks(server, "c8a3f1").await;
    client.login().await.expect("stubbed login should succeed");
    client
}

/// Decode an application/x-www-form-urlencoded body into pairs.
pub fn form_pairs(body: &[u8]) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(body).expect("request body should be form-encoded")
}

/// Value of a single form field.
pub fn form_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

/// Most recent captured request whose form body names the given operation.
pub async fn last_post_for(server: &MockServer, operation: &str) -> wiremock::Request {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .into_iter()
        .rev()
        .find(|r| form_value(&form_pairs(&r.body), "operation").as_deref() == Some(operation))
        .unwrap_or_else(|| panic!("no captured POST for {}", operation))
}
