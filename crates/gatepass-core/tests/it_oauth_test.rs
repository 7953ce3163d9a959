//! Integration tests for the GitHub OAuth2 initiation and callback exchange

use std::sync::Arc;

use gatepass_core::{
    AuthClient, AuthConfig, Error, MemorySessionStore, OAuthRedirect, OAuthState,
};
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(server: &Server) -> AuthClient {
    AuthClient::new(
        AuthConfig::new(server.url(), "pepper"),
        Arc::new(MemorySessionStore::new()),
    )
    .expect("Failed to build client")
}

#[tokio::test]
async fn initiate_uses_service_provided_github_redirect() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/auth/oauth2/github/login")
        .with_status(200)
        .with_body(r#"{"redirectUrl": "https://github.com/login/oauth/authorize?client_id=abc"}"#)
        .create_async()
        .await;

    //* When
    let redirect = client_for(&server)
        .initiate_github_oauth()
        .await
        .expect("Initiation should succeed");

    //* Then
    match redirect {
        OAuthRedirect::ProviderRedirect(url) => {
            assert_eq!(url.host_str(), Some("github.com"));
            assert_eq!(url.path(), "/login/oauth/authorize");
        }
        other => panic!("Expected provider redirect, got {:?}", other),
    }
}

#[tokio::test]
async fn initiate_discards_redirect_to_foreign_host() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/auth/oauth2/github/login")
        .with_status(200)
        .with_body(r#"{"redirectUrl": "https://evil.example.com/login/oauth/authorize"}"#)
        .create_async()
        .await;

    //* When
    let redirect = client_for(&server)
        .initiate_github_oauth()
        .await
        .expect("Initiation should still succeed via the fallback");

    //* Then: the hostile URL is never used
    match redirect {
        OAuthRedirect::DirectFallback(url) => {
            assert_ne!(url.host_str(), Some("evil.example.com"));
            assert_eq!(url.path(), "/auth/oauth2/github/login");
        }
        other => panic!("Expected direct fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn initiate_falls_back_when_api_errors() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/auth/oauth2/github/login")
        .with_status(503)
        .create_async()
        .await;

    //* When
    let redirect = client_for(&server)
        .initiate_github_oauth()
        .await
        .expect("Fallback must not dead-end the flow");

    //* Then
    assert!(matches!(redirect, OAuthRedirect::DirectFallback(_)));
    assert!(redirect
        .url()
        .as_str()
        .ends_with("/auth/oauth2/github/login"));
}

#[tokio::test]
async fn initiate_falls_back_when_response_has_no_url() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/auth/oauth2/github/login")
        .with_status(200)
        .with_body(r#"{"message": "use the redirect"}"#)
        .create_async()
        .await;

    //* When
    let redirect = client_for(&server)
        .initiate_github_oauth()
        .await
        .expect("Initiation should succeed");

    //* Then
    assert!(matches!(redirect, OAuthRedirect::DirectFallback(_)));
}

#[tokio::test]
async fn callback_exchanges_code_for_session() {
    //* Given
    let mut server = Server::new_async().await;

    let callback_mock = server
        .mock("POST", "/auth/oauth2/github/callback")
        .match_body(Matcher::PartialJson(json!({
            "code": "authcode-1",
            "state": "state-1",
        })))
        .with_status(200)
        .with_body(
            r#"{
                "access_token": "t2",
                "refresh_token": "r1",
                "user": {
                    "id": 583231,
                    "username": "octocat",
                    "avatar_url": "https://avatars.example/octocat.png"
                }
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    //* When
    let session = client_for(&server)
        .handle_github_callback(&OAuthState::new("authcode-1", "state-1"))
        .await
        .expect("Exchange should succeed");

    //* Then
    callback_mock.assert_async().await;
    assert_eq!(session.token, "t2");
    assert_eq!(session.refresh_token.as_deref(), Some("r1"));
    assert_eq!(session.user.username.as_deref(), Some("octocat"));
    assert_eq!(session.user.github_id.as_deref(), Some("583231"));
    assert_eq!(
        session.user.avatar.as_deref(),
        Some("https://avatars.example/octocat.png")
    );
}

#[tokio::test]
async fn callback_without_token_is_an_oauth_failure() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/auth/oauth2/github/callback")
        .with_status(200)
        .with_body(r#"{"user": {"id": 1}}"#)
        .create_async()
        .await;

    //* When
    let result = client_for(&server)
        .handle_github_callback(&OAuthState::new("authcode-1", "state-1"))
        .await;

    //* Then
    assert!(matches!(result, Err(Error::OAuthFailure(_))));
}
