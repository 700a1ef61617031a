use std::time::Duration;

use serde_json::json;
use studio_core::{AuthUser, Credentials};
use studio_engine::{
    authenticate_and_store, ApiSettings, LocalStore, ReqwestAuthClient, UNREACHABLE_MESSAGE,
};
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base: &str) -> ReqwestAuthClient {
    ReqwestAuthClient::new(ApiSettings {
        base_url: base.to_string(),
        request_timeout: Duration::from_secs(2),
    })
    .expect("client")
}

fn signup() -> Credentials {
    Credentials::Signup {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "secret".into(),
    }
}

#[tokio::test]
async fn signup_persists_token_and_user() {
    studio_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(body_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "tok-123",
            "user": {"name": "Ada", "email": "ada@example.com"}
        })))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let store = LocalStore::new(temp.path());
    let result = authenticate_and_store(&client_for(&server.uri()), &store, &signup()).await;

    let expected = AuthUser {
        name: "Ada".into(),
        email: Some("ada@example.com".into()),
    };
    assert_eq!(result, Ok(Some(expected.clone())));
    assert_eq!(store.auth_token().as_deref(), Some("tok-123"));
    assert_eq!(store.current_user(), Some(expected));
}

#[tokio::test]
async fn login_without_user_keeps_token_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t"})))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let store = LocalStore::new(temp.path());
    let credentials = Credentials::Login {
        email: "a@b.c".into(),
        password: "pw".into(),
    };
    let result = authenticate_and_store(&client_for(&server.uri()), &store, &credentials).await;

    assert_eq!(result, Ok(None));
    assert_eq!(store.auth_token().as_deref(), Some("t"));
    assert_eq!(store.current_user(), None);
}

#[tokio::test]
async fn server_error_field_is_shown_otherwise_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "Email already used"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let store = LocalStore::new(temp.path());
    let client = client_for(&server.uri());

    let first = authenticate_and_store(&client, &store, &signup()).await;
    assert_eq!(first, Err("Email already used".to_string()));
    let second = authenticate_and_store(&client, &store, &signup()).await;
    assert_eq!(second, Err("Signup failed. Please try again.".to_string()));
    assert_eq!(store.auth_token(), None);
}

#[tokio::test]
async fn unreachable_or_garbled_server_reports_connection_problem() {
    let temp = TempDir::new().unwrap();
    let store = LocalStore::new(temp.path());

    let unreachable =
        authenticate_and_store(&client_for("http://127.0.0.1:9"), &store, &signup()).await;
    assert_eq!(unreachable, Err(UNREACHABLE_MESSAGE.to_string()));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let garbled = authenticate_and_store(&client_for(&server.uri()), &store, &signup()).await;
    assert_eq!(garbled, Err(UNREACHABLE_MESSAGE.to_string()));
}
