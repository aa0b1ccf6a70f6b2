//! Integration tests for the Koov HTTP client

use koov_core::{AuthClient, AuthError, Credentials, Role};
use koov_http::types::{LoginRequest, RefreshRequest};
use koov_http::{ClientError, HttpAuthClient, PublicClient, TypedClientBuilder};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn login_body(role: &str) -> serde_json::Value {
    json!({
        "statusCode": 200,
        "data": {
            "accessToken": "acc-1",
            "refreshToken": "ref-1",
            "user": {
                "fullName": "Ann Lee",
                "jobId": "E100",
                "role": role,
                "area": "North",
                "totalTargetCompleted": 7
            }
        }
    })
}

#[test]
fn builder_requires_base_url() {
    let result = TypedClientBuilder::new().build_public();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[test]
fn builder_trims_trailing_slash() {
    let client = PublicClient::new("http://localhost:8000/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000");
}

#[tokio::test]
async fn login_posts_credentials_and_builds_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"jobId": "E100", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body("salesperson")))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpAuthClient::new(server.uri()).unwrap();
    let session = client
        .login(&Credentials::new("E100", "pw"))
        .await
        .unwrap();

    assert_eq!(session.access_token(), "acc-1");
    assert_eq!(session.refresh_token(), "ref-1");
    assert_eq!(session.role(), Role::Salesperson);
    assert_eq!(session.user.name, "Ann Lee");
    assert_eq!(session.user.area.as_deref(), Some("North"));
}

#[tokio::test]
async fn login_rejection_becomes_form_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad"})))
        .mount(&server)
        .await;

    let client = HttpAuthClient::new(server.uri()).unwrap();
    let err = client
        .login(&Credentials::new("E100", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AuthError::LoginFailed("Login failed. Please check your credentials and try again.".into())
    );
}

#[tokio::test]
async fn refresh_rotates_token_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/common/token"))
        .and(body_json(json!({"refreshToken": "ref-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "data": {"accessToken": "acc-2", "refreshToken": "ref-2"}
        })))
        .mount(&server)
        .await;

    let client = HttpAuthClient::new(server.uri()).unwrap();
    let tokens = client.refresh("ref-1").await.unwrap();
    assert_eq!(tokens.access_token, "acc-2");
    assert_eq!(tokens.refresh_token, "ref-2");
}

#[tokio::test]
async fn refresh_failures_are_all_refresh_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/common/token"))
        .and(body_json(json!({"refreshToken": "expired"})))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/common/token"))
        .and(body_json(json!({"refreshToken": "odd"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"statusCode": 403, "data": null})),
        )
        .mount(&server)
        .await;

    let client = HttpAuthClient::new(server.uri()).unwrap();
    assert!(matches!(
        client.refresh("expired").await,
        Err(AuthError::RefreshFailed(_))
    ));
    assert!(matches!(
        client.refresh("odd").await,
        Err(AuthError::RefreshFailed(_))
    ));

    // nothing listening
    let offline = HttpAuthClient::new("http://127.0.0.1:9").unwrap();
    assert!(matches!(
        offline.refresh("any").await,
        Err(AuthError::RefreshFailed(_))
    ));
}

#[tokio::test]
async fn logout_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/common/logoutUser"))
        .and(header("authorization", "Bearer acc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpAuthClient::new(server.uri()).unwrap();
    client.logout("acc-1").await.unwrap();
}

#[tokio::test]
async fn logout_failure_is_reported_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/common/logoutUser"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpAuthClient::new(server.uri()).unwrap();
    assert!(matches!(
        client.logout("acc-1").await,
        Err(AuthError::LogoutFailed(_))
    ));
}

#[tokio::test]
async fn change_password_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/common/changePassword"))
        .and(header("authorization", "Bearer acc-1"))
        .and(body_json(json!({"oldPassword": "old", "newPassword": "newpass12"})))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Old password is incorrect"})),
        )
        .mount(&server)
        .await;

    let client = HttpAuthClient::new(server.uri()).unwrap();
    let err = client
        .change_password("acc-1", "old", "newpass12")
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message().as_deref(),
        Some("Old password is incorrect")
    );
}

#[tokio::test]
async fn change_password_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/common/changePassword"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = HttpAuthClient::new(server.uri()).unwrap();
    let err = client
        .change_password("acc-1", "old", "newpass12")
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message().as_deref(),
        Some("An error occurred while changing the password")
    );
}

#[tokio::test]
async fn raw_endpoints_are_typed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body("admin")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/common/token"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let client = PublicClient::new(server.uri()).unwrap();
    let login = client
        .login(&LoginRequest {
            job_id: "A1".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.data.user.role, "admin");

    let err = client
        .refresh_token(&RefreshRequest {
            refresh_token: "x".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}
