//! AuthSession against a mocked server.

use galleria::client::{
    AuthSession, ClientError, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    RecordingNavigator, SessionUser, TOKEN_KEY, USER_KEY,
};
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn user() -> SessionUser {
    SessionUser {
        email: "a@b.com".to_string(),
    }
}

fn session_for(
    server: &MockServer,
    store: Arc<dyn CredentialStore>,
) -> (AuthSession, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new());
    let session = AuthSession::load(&server.uri(), store, navigator.clone()).unwrap();
    (session, navigator)
}

#[tokio::test]
async fn test_request_attaches_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/images"))
        .and(header("authorization", "Bearer t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "images": ["a.png"] })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut session, navigator) = session_for(&server, Arc::new(MemoryCredentialStore::new()));
    session.set_auth("t0k3n", user()).unwrap();

    let images = session.images().await.unwrap();
    assert_eq!(images, vec!["a.png".to_string()]);
    assert!(session.is_logged_in());
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn test_unauthorized_response_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/protected"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "nope" })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let (mut session, navigator) = session_for(&server, store.clone());
    session.set_auth("stale", user()).unwrap();

    let response = session
        .request(Method::GET, "/api/protected", None)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!session.is_logged_in());
    assert_eq!(session.token(), None);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
    assert_eq!(
        navigator.visits(),
        vec![format!("{}/home_page.html", server.uri())]
    );
}

#[tokio::test]
async fn test_other_error_statuses_keep_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/images"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Unable to list images" })),
        )
        .mount(&server)
        .await;

    let (mut session, navigator) = session_for(&server, Arc::new(MemoryCredentialStore::new()));
    session.set_auth("t0k3n", user()).unwrap();

    let response = session
        .request(Method::GET, "/api/images", None)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    match session.images().await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Unable to list images");
        }
        other => panic!("expected API error, got {:?}", other.map(|_| ())),
    }
    assert!(session.is_logged_in());
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn test_login_persists_token_across_loads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": " A@B.com", "password": "secret1" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "token": "issued" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");

    let (mut session, _) = session_for(&server, Arc::new(FileCredentialStore::new(&path)));
    session.login(" A@B.com", "secret1").await.unwrap();
    assert_eq!(session.token(), Some("issued"));

    let (reloaded, _) = session_for(&server, Arc::new(FileCredentialStore::new(&path)));
    assert!(reloaded.is_logged_in());
    assert_eq!(reloaded.token(), Some("issued"));
    assert_eq!(reloaded.user(), Some(&user()));
}

#[tokio::test]
async fn test_failed_login_reports_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": "Invalid email or password." })),
        )
        .mount(&server)
        .await;

    let (mut session, navigator) = session_for(&server, Arc::new(MemoryCredentialStore::new()));
    let err = session.login("a@b.com", "wrong").await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Api { status: 401, ref message } if message == "Invalid email or password."
    ));
    assert!(!session.is_logged_in());
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn test_logout_notifies_server_and_clears() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let (mut session, navigator) = session_for(&server, store.clone());
    session.set_auth("t0k3n", user()).unwrap();

    session.logout().await.unwrap();

    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(navigator.visits().len(), 1);
}

#[tokio::test]
async fn test_logout_clears_even_when_server_unreachable() {
    let store = Arc::new(MemoryCredentialStore::new());
    store.set(TOKEN_KEY, "t0k3n").unwrap();
    store
        .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
        .unwrap();

    let navigator = Arc::new(RecordingNavigator::new());
    // Nothing listens on port 9 locally
    let session = AuthSession::load("http://127.0.0.1:9", store.clone(), navigator.clone()).unwrap();
    assert!(session.is_logged_in());

    session.logout().await.unwrap();

    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
    assert_eq!(navigator.visits(), vec!["http://127.0.0.1:9/home_page.html".to_string()]);
}

#[tokio::test]
async fn test_require_auth_redirects_when_anonymous() {
    let server = MockServer::start().await;
    let (mut session, navigator) = session_for(&server, Arc::new(MemoryCredentialStore::new()));

    assert!(!session.require_auth());
    assert_eq!(navigator.visits().len(), 1);

    session.set_auth("t0k3n", user()).unwrap();
    assert!(session.require_auth());
    assert_eq!(navigator.visits().len(), 1);
}
