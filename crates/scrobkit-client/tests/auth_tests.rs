// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the mobile-session exchange.

use scrobkit_client::{LastfmClient, LastfmError};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> LastfmClient {
    LastfmClient::builder()
        .base_url(server.uri())
        .api_key("key123")
        .secret("secret123")
        .credentials("alice", "wonderland")
        .build()
        .unwrap()
}

fn session_response() -> serde_json::Value {
    serde_json::json!({
        "session": {
            "name": "alice",
            "key": "sessionkey123",
            "subscriber": "0"
        }
    })
}

#[tokio::test]
async fn authenticate_posts_signed_credentials_and_returns_the_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("method=auth.getMobileSession"))
        .and(body_string_contains("username=alice"))
        .and(body_string_contains("password=wonderland"))
        .and(body_string_contains("api_key=key123"))
        .and(body_string_contains("format=json"))
        // MD5 over the sorted key/value concatenation plus the secret.
        .and(body_string_contains("api_sig=4c5d09eb8f0bd9dd29cd512cbe9620d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response()))
        .expect(1)
        .mount(&server)
        .await;

    let session = client(&server).authenticate().await.unwrap();
    assert_eq!(session.name, "alice");
    assert_eq!(session.key, "sessionkey123");
    assert!(!session.subscriber);
}

#[tokio::test]
async fn rejected_credentials_surface_the_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": 4,
            "message": "Invalid authentication token supplied"
        })))
        .mount(&server)
        .await;

    let err = client(&server).authenticate().await.unwrap_err();
    match err {
        LastfmError::AuthenticationFailed { code, message } => {
            assert_eq!(code, 4);
            assert_eq!(message, "Invalid authentication token supplied");
        }
        other => panic!("expected authentication failure, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_session_key_is_an_authentication_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "session": {"name": "alice", "key": "", "subscriber": "0"}
        })))
        .mount(&server)
        .await;

    let err = client(&server).authenticate().await.unwrap_err();
    match err {
        LastfmError::AuthenticationFailed { code, message } => {
            assert_eq!(code, -1);
            assert_eq!(message, "session key is missing");
        }
        other => panic!("expected authentication failure, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_credentials_fail_before_any_request() {
    let server = MockServer::start().await;

    let no_account = LastfmClient::builder()
        .base_url(server.uri())
        .api_key("key123")
        .secret("secret123")
        .build()
        .unwrap();
    assert!(matches!(
        no_account.authenticate().await.unwrap_err(),
        LastfmError::MissingUsername
    ));

    let no_secret = LastfmClient::builder()
        .base_url(server.uri())
        .api_key("key123")
        .credentials("alice", "wonderland")
        .build()
        .unwrap();
    assert!(matches!(
        no_secret.authenticate().await.unwrap_err(),
        LastfmError::MissingSecret
    ));

    let no_key = LastfmClient::builder()
        .base_url(server.uri())
        .secret("secret123")
        .credentials("alice", "wonderland")
        .build()
        .unwrap();
    assert!(matches!(
        no_key.authenticate().await.unwrap_err(),
        LastfmError::MissingApiKey
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn check_login_verifies_explicit_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("username=bob"))
        .and(body_string_contains("password=builder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "session": {"name": "bob", "key": "bobkey", "subscriber": "1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    // check_login ignores the configured account entirely.
    let session = client(&server).check_login("bob", "builder").await.unwrap();
    assert_eq!(session.name, "bob");
    assert!(session.subscriber);
}

#[tokio::test]
async fn check_login_rejects_empty_arguments_locally() {
    let server = MockServer::start().await;
    let client = client(&server);

    assert!(matches!(
        client.check_login("", "pw").await.unwrap_err(),
        LastfmError::MissingUsername
    ));
    assert!(matches!(
        client.check_login("bob", "").await.unwrap_err(),
        LastfmError::MissingPassword
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}
