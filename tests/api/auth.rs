//! Login handshake tests against the stubbed webservice endpoint

use anyhow::Result;
use serde_json::json;
use vtiger_client::api::auth::access_key_hash;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

#[tokio::test]
async fn test_login_sets_session_from_response() -> Result<()> {
    let server = MockServer::start().await;
    let mut client = test_client(&server);
    mount_login_mocks(&server, "c8a3f1").await;

    let response = client.login().await?;

    // The envelope comes back unchanged
    assert!(response.success);
    assert_eq!(response.result.as_ref(), Some(&login_response()["result"]));

    // All session fields come from the login result, set together
    let session = client.session().expect("session should be set after login");
    assert_eq!(session.session_name, SESSION_NAME);
    assert_eq!(session.user_id, USER_ID);
    assert_eq!(session.user_profile, login_response()["result"]);
    Ok(())
}

#[tokio::test]
async fn test_login_posts_challenge_digest_instead_of_plaintext_key() -> Result<()> {
    let server = MockServer::start().await;
    let mut client = test_client(&server);
    mount_login_mocks(&server, "c8a3f1").await;

    client.login().await?;

    let request = last_post_for(&server, "login").await;
    let pairs = form_pairs(&request.body);
    assert_eq!(form_value(&pairs, "username").as_deref(), Some(USERNAME));
    assert_eq!(
        form_value(&pairs, "accessKey"),
        Some(access_key_hash("c8a3f1", ACCESS_KEY))
    );
    // The shared secret itself must never travel
    assert!(!String::from_utf8_lossy(&request.body).contains(ACCESS_KEY));
    Ok(())
}

#[tokio::test]
async fn test_login_stops_after_rejected_challenge() {
    let server = MockServer::start().await;
    let mut client = test_client(&server);

    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "getchallenge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": {"code": "INVALID_USERNAME", "message": "Invalid username admin"}
        })))
        .mount(&server)
        .await;

    let err = client.login().await.expect_err("login should fail");
    assert_eq!(err.to_string(), "Invalid username admin");
    assert!(client.session().is_none());

    // The handshake must stop before the login POST is attempted
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_challenge_rejection_without_message_uses_fallback() {
    let server = MockServer::start().await;
    let mut client = test_client(&server);

    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "getchallenge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": {}
        })))
        .mount(&server)
        .await;

    let err = client.login().await.expect_err("login should fail");
    assert_eq!(err.to_string(), "failed to get challenge token");
}

#[tokio::test]
async fn test_rejected_login_leaves_session_absent() {
    let server = MockServer::start().await;
    let mut client = test_client(&server);

    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "getchallenge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {"token": "c8a3f1"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/webservice.php"))
        .and(body_string_contains("operation=login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": {
                "code": "INVALID_USER_CREDENTIALS",
                "message": "Invalid username or password"
            }
        })))
        .mount(&server)
        .await;

    let err = client.login().await.expect_err("login should fail");
    assert_eq!(err.to_string(), "Invalid username or password");
    assert!(client.session().is_none());
}

#[tokio::test]
async fn test_transport_failure_leaves_session_absent() {
    let server = MockServer::start().await;
    let mut client = test_client(&server);

    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    assert!(client.login().await.is_err());
    assert!(client.session().is_none());
}

#[tokio::test]
async fn test_logout_posts_token_and_keeps_local_copy() -> Result<()> {
    let server = MockServer::start().await;
    let mut client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/webservice.php"))
        .and(body_string_contains("operation=logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {"message": "successfully logged out"}
        })))
        .mount(&server)
        .await;

    let response = client.logout().await?;
    assert!(response.success);

    let request = last_post_for(&server, "logout").await;
    let pairs = form_pairs(&request.body);
    assert_eq!(form_value(&pairs, "sessionName").as_deref(), Some(SESSION_NAME));

    // Invalidation is the remote's side of the contract; the local copy stays
    let session = client.session().expect("local session survives logout");
    assert_eq!(session.session_name, SESSION_NAME);
    Ok(())
}
