//! Mock dashboard tests for the comptoir HTTP client.
//!
//! These tests use wiremock to simulate the dashboard API and verify the
//! client's header handling, single-retry refresh flow and login behavior
//! without network access or real credentials.

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use comptoir_core::{DashboardUrl, LoginError, MemoryTokenStore, StaticCsrf, TokenStore};
use comptoir_http::{ApiClient, ApiRequest};
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;

/// Helper to create a dashboard URL from a mock server.
fn dashboard_url(server: &MockServer) -> DashboardUrl {
    DashboardUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// Helper yielding a URL with nothing listening behind it.
///
/// Binds an ephemeral port and releases it again, so connecting gets
/// refused. The port never belonged to a mock server, whose listeners
/// stay pooled for the whole process.
fn unreachable_url() -> DashboardUrl {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    DashboardUrl::new(format!("http://127.0.0.1:{port}")).unwrap()
}

/// Helper wiring a client to a mock server with an inspectable store.
fn client_with(server: &MockServer, store: &Arc<MemoryTokenStore>) -> ApiClient {
    ApiClient::new(
        dashboard_url(server),
        store.clone(),
        Arc::new(StaticCsrf::none()),
    )
}

/// Matches requests that carry no Authorization header at all.
struct NoAuthorizationHeader;

impl Match for NoAuthorizationHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

// ============================================================================
// Request Header Tests
// ============================================================================

#[tokio::test]
async fn test_anonymous_request_has_no_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/offers/"))
        .and(NoAuthorizationHeader)
        .and(header("content-type", "application/json"))
        .and(header("x-csrftoken", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with(&server, &store);

    let offers: Value = client.get("/offers/").await.unwrap();
    assert_eq!(offers, json!([]));
}

#[tokio::test]
async fn test_stored_access_token_is_sent_as_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile/"))
        .and(header("authorization", "Bearer access-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "vendeur"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(Some("access-jwt"), None));
    let client = client_with(&server, &store);

    let profile: Value = client.get("/profile/").await.unwrap();
    assert_eq!(profile["username"], "vendeur");
}

#[tokio::test]
async fn test_csrf_token_header_is_sent_when_available() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/orders/7/"))
        .and(header("x-csrftoken", "csrf-abc"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(
        dashboard_url(&server),
        store.clone(),
        Arc::new(StaticCsrf::new("csrf-abc")),
    );

    let response = client.delete("/orders/7/").await.unwrap();
    assert_eq!(response.status().as_u16(), 204);
}

#[tokio::test]
async fn test_caller_header_override_reaches_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload/"))
        .and(header("content-type", "text/csv"))
        .and(body_string("sku;qty\nR100;2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with(&server, &store);

    let request = ApiRequest::new(Method::POST, "/upload/")
        .with_body("sku;qty\nR100;2")
        .header(CONTENT_TYPE, "text/csv".parse().unwrap());

    let response = client.dispatch(&request).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_get_parses_error_payloads_too() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "Accès refusé"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with(&server, &store);

    let body: Value = client.get("/orders/").await.unwrap();
    assert_eq!(body["detail"], "Accès refusé");
}

// ============================================================================
// Token Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_expired_token_is_refreshed_and_the_request_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(json!({ "refresh": "valid" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "new"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [1, 2]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(
        Some("expired"),
        Some("valid"),
    ));
    let client = client_with(&server, &store);

    let body: Value = client.get("/orders/").await.unwrap();

    assert_eq!(body["orders"], json!([1, 2]));
    // Only the access slot was replaced
    assert_eq!(store.access_token().unwrap().unwrap().as_str(), "new");
    assert_eq!(store.refresh_token().unwrap().unwrap().as_str(), "valid");
}

#[tokio::test]
async fn test_post_body_is_replayed_on_the_retried_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/"))
        .and(header("authorization", "Bearer expired"))
        .and(body_json(json!({ "item": "recharge" })))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "new"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/orders/"))
        .and(header("authorization", "Bearer new"))
        .and(body_json(json!({ "item": "recharge" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(
        Some("expired"),
        Some("valid"),
    ));
    let client = client_with(&server, &store);

    let response = client.post("/orders/", &json!({ "item": "recharge" })).await.unwrap();
    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn test_no_refresh_on_anonymous_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "new"
        })))
        .expect(0)
        .mount(&server)
        .await;

    // A refresh token exists, but no access token was attached to the call
    let store = Arc::new(MemoryTokenStore::with_tokens(None, Some("valid")));
    let client = client_with(&server, &store);

    let request = ApiRequest::new(Method::GET, "/orders/");
    let response = client.dispatch(&request).await.unwrap();

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(store.refresh_token().unwrap().unwrap().as_str(), "valid");
}

#[tokio::test]
async fn test_missing_refresh_token_returns_the_original_401() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "new"
        })))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(Some("expired"), None));
    let client = client_with(&server, &store);

    let request = ApiRequest::new(Method::GET, "/orders/");
    let response = client.dispatch(&request).await.unwrap();

    assert_eq!(response.status().as_u16(), 401);
    // Short-circuiting leaves the store untouched
    assert_eq!(store.access_token().unwrap().unwrap().as_str(), "expired");
}

#[tokio::test]
async fn test_rejected_refresh_clears_both_slots() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(
        Some("expired"),
        Some("stale"),
    ));
    let client = client_with(&server, &store);

    let request = ApiRequest::new(Method::GET, "/orders/");
    let response = client.dispatch(&request).await.unwrap();

    assert_eq!(response.status().as_u16(), 401);
    assert!(store.access_token().unwrap().is_none());
    assert!(store.refresh_token().unwrap().is_none());
}

#[tokio::test]
async fn test_refresh_with_garbage_body_clears_both_slots() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>maintenance</html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(
        Some("expired"),
        Some("valid"),
    ));
    let client = client_with(&server, &store);

    let request = ApiRequest::new(Method::GET, "/orders/");
    let response = client.dispatch(&request).await.unwrap();

    assert_eq!(response.status().as_u16(), 401);
    assert!(store.access_token().unwrap().is_none());
    assert!(store.refresh_token().unwrap().is_none());
}

#[tokio::test]
async fn test_retried_response_is_returned_even_when_still_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "new"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(
        Some("expired"),
        Some("valid"),
    ));
    let client = client_with(&server, &store);

    let request = ApiRequest::new(Method::GET, "/admin/");
    let response = client.dispatch(&request).await.unwrap();

    // One retry, never a second; the retried response comes back as-is
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(store.access_token().unwrap().unwrap().as_str(), "new");
}

#[tokio::test]
async fn test_transport_error_on_dispatch_propagates() {
    // Unlike refresh failures, a dead connection on the dispatched request
    // itself surfaces as an error instead of being swallowed.
    let base = unreachable_url();

    let store = Arc::new(MemoryTokenStore::with_tokens(
        Some("access-jwt"),
        Some("refresh-jwt"),
    ));
    let client = ApiClient::new(base, store.clone(), Arc::new(StaticCsrf::none()));

    let request = ApiRequest::new(Method::GET, "/orders/");
    let result = client.dispatch(&request).await;

    assert!(matches!(result, Err(comptoir_core::Error::Transport(_))));
    // The store is only touched by a failed refresh, never by a failed send
    assert_eq!(
        store.access_token().unwrap().unwrap().as_str(),
        "access-jwt"
    );
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({
            "username": "vendeur",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "access-jwt",
            "refresh": "refresh-jwt"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with(&server, &store);

    client.login("vendeur", "secret123").await.unwrap();

    assert_eq!(
        store.access_token().unwrap().unwrap().as_str(),
        "access-jwt"
    );
    assert_eq!(
        store.refresh_token().unwrap().unwrap().as_str(),
        "refresh-jwt"
    );
}

#[tokio::test]
async fn test_login_is_sent_without_session_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "fresh-access",
            "refresh": "fresh-refresh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // A stale session exists, but login always starts from scratch
    let store = Arc::new(MemoryTokenStore::with_tokens(Some("stale"), Some("stale")));
    let client = client_with(&server, &store);

    client.login("vendeur", "secret").await.unwrap();

    assert_eq!(
        store.access_token().unwrap().unwrap().as_str(),
        "fresh-access"
    );
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with(&server, &store);

    let result = client.login("vendeur", "wrongpass").await;

    assert_eq!(result, Err(LoginError::InvalidCredentials));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Identifiants incorrects"
    );
    assert!(store.access_token().unwrap().is_none());
}

#[tokio::test]
async fn test_login_connection_error() {
    let store = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(
        unreachable_url(),
        store.clone(),
        Arc::new(StaticCsrf::none()),
    );

    let result = client.login("vendeur", "secret").await;

    assert_eq!(result, Err(LoginError::Connection));
    assert_eq!(result.unwrap_err().to_string(), "Erreur de connexion");
}

#[tokio::test]
async fn test_login_with_malformed_body_is_a_connection_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("not json")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with(&server, &store);

    let result = client.login("vendeur", "secret").await;

    assert_eq!(result, Err(LoginError::Connection));
    assert!(store.access_token().unwrap().is_none());
}

#[tokio::test]
async fn test_login_without_refresh_token_keeps_the_slot_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "access-jwt"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with(&server, &store);

    client.login("vendeur", "secret").await.unwrap();

    assert_eq!(
        store.access_token().unwrap().unwrap().as_str(),
        "access-jwt"
    );
    assert!(store.refresh_token().unwrap().is_none());
}

// ============================================================================
// Cookie Jar Tests
// ============================================================================

#[tokio::test]
async fn test_cookie_jar_feeds_the_csrf_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bootstrap/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .insert_header("set-cookie", "csrftoken=server-tok; Path=/"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .and(header("x-csrftoken", "server-tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::with_cookie_jar(dashboard_url(&server), store.clone());

    // First request receives the cookie, second sends it back as the header
    let _: Value = client.get("/bootstrap/").await.unwrap();
    let orders: Value = client.get("/orders/").await.unwrap();

    assert_eq!(orders, json!([]));
}
