//! Session guard driven end-to-end against a mocked backend

use koov_core::{
    AppRoute, GuardState, GuardView, MemoryStore, Role, Session, SessionGuard, SessionManager,
    SessionStore, TokenPair, TokenStore, UserDetails,
};
use koov_http::HttpAuthClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seed(store: &MemoryStore, role: Role) {
    SessionStore::new(store.clone()).save(&Session::new(
        TokenPair {
            access_token: "acc-0".into(),
            refresh_token: "ref-0".into(),
        },
        UserDetails::new("Ann Lee", "E100", role, None, None),
    ));
}

async fn refresh_calls(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/common/token")
        .count()
}

async fn backend_accepting_refresh() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/common/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "data": {"accessToken": "acc-new", "refreshToken": "ref-new"}
        })))
        .mount(&server)
        .await;
    server
}

fn manager(store: &MemoryStore, server: &MockServer) -> Arc<SessionManager<MemoryStore, HttpAuthClient>> {
    Arc::new(SessionManager::new(
        store.clone(),
        HttpAuthClient::new(server.uri()).unwrap(),
    ))
}

#[tokio::test]
async fn mount_with_valid_session_renders_and_rotates() {
    let server = backend_accepting_refresh().await;
    let store = MemoryStore::new();
    seed(&store, Role::Production);

    let mut guard = SessionGuard::new(manager(&store, &server), Role::Production);
    assert_eq!(guard.mount().await, GuardView::Children);
    assert_eq!(guard.state(), GuardState::Authenticated);
    assert_eq!(store.get("accessToken").as_deref(), Some("acc-new"));
    assert_eq!(store.get("refreshToken").as_deref(), Some("ref-new"));
}

#[tokio::test]
async fn rejected_refresh_clears_storage_and_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/common/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let store = MemoryStore::new();
    seed(&store, Role::Admin);
    store.set("theme", "dark");

    let mut guard = SessionGuard::new(manager(&store, &server), Role::Admin);
    assert_eq!(guard.mount().await, GuardView::Redirect(AppRoute::Login));
    for key in ["accessToken", "refreshToken", "userDetails"] {
        assert!(store.get(key).is_none(), "{key} should be cleared");
    }
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}

#[tokio::test]
async fn wrong_area_redirects_without_logout() {
    let server = backend_accepting_refresh().await;
    let store = MemoryStore::new();
    seed(&store, Role::Salesperson);

    let mut guard = SessionGuard::new(manager(&store, &server), Role::Admin);
    assert_eq!(guard.mount().await, GuardView::Redirect(AppRoute::Home));
    assert!(store.get("accessToken").is_some());
    assert!(store.get("userDetails").is_some());
}

#[tokio::test]
async fn missing_refresh_token_never_calls_backend() {
    let server = backend_accepting_refresh().await;
    let store = MemoryStore::new();

    let mut guard = SessionGuard::new(manager(&store, &server), Role::Salesperson);
    assert_eq!(guard.mount().await, GuardView::Redirect(AppRoute::Login));
    assert_eq!(refresh_calls(&server).await, 0);
}

#[tokio::test]
async fn recurring_refresh_stops_after_unmount() {
    let server = backend_accepting_refresh().await;
    let store = MemoryStore::new();
    seed(&store, Role::Admin);

    let mut guard = SessionGuard::new(manager(&store, &server), Role::Admin)
        .with_interval(Duration::from_millis(100));
    guard.mount().await;

    tokio::time::sleep(Duration::from_millis(250)).await;
    let before_unmount = refresh_calls(&server).await;
    assert!(before_unmount >= 2, "expected background refreshes, saw {before_unmount}");

    guard.unmount();
    assert!(!guard.is_refreshing());
    tokio::time::sleep(Duration::from_millis(50)).await;
    let after_unmount = refresh_calls(&server).await;

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(refresh_calls(&server).await, after_unmount);
}
