use api_client::auth::{AuthStore, TokenStore};
use api_client::client::ApiClient;
use api_client::config::ApiConfig;
use api_client::error::ApiError;
use api_client::navigation::{LOGIN_PATH, Navigator};
use std::sync::{Arc, Mutex};

/// Router stand-in that records every requested transition.
#[derive(Default)]
struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

#[derive(serde::Deserialize, serde::Serialize, Debug, PartialEq)]
struct Profile {
    username: String,
    admin: bool,
}

#[test_log::test(tokio::test)]
async fn test_authenticated_round_trip() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v1/profile")
        .match_header("authorization", "Bearer session-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"username": "alice", "admin": true}"#)
        .create_async()
        .await;

    let store = Arc::new(TokenStore::new());
    store.set_token("session-token");

    let client = ApiClient::builder(ApiConfig::new(server.url()))
        .with_auth_store(store)
        .build();

    let profile: Profile = client.get("/api/v1/profile").await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        profile,
        Profile {
            username: "alice".to_string(),
            admin: true
        }
    );
}

#[test_log::test(tokio::test)]
async fn test_expired_session_logs_out_and_redirects() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v1/profile")
        .with_status(403)
        .create_async()
        .await;

    let store = Arc::new(TokenStore::new());
    store.set_token("stale-token");
    let navigator = Arc::new(RecordingNavigator::default());

    let client = ApiClient::builder(ApiConfig::new(server.url()))
        .with_auth_store(store.clone())
        .with_navigator(navigator.clone())
        .build();

    let result: Result<Profile, ApiError> = client.get("/api/v1/profile").await;

    mock.assert_async().await;
    assert!(result.unwrap_err().is_forbidden());
    assert_eq!(store.token(), None);
    assert_eq!(*navigator.paths.lock().unwrap(), vec![LOGIN_PATH.to_string()]);
}

#[test_log::test(tokio::test)]
async fn test_server_error_keeps_session_intact() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/api/v1/profile")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let store = Arc::new(TokenStore::new());
    store.set_token("good-token");
    let navigator = Arc::new(RecordingNavigator::default());

    let client = ApiClient::builder(ApiConfig::new(server.url()))
        .with_auth_store(store.clone())
        .with_navigator(navigator.clone())
        .build();

    let body = Profile {
        username: "alice".to_string(),
        admin: false,
    };
    let result: Result<Profile, ApiError> = client.post("/api/v1/profile", &body).await;

    let err = result.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert_eq!(store.token(), Some("good-token".to_string()));
    assert!(navigator.paths.lock().unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_global_handle_serves_plugins() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v1/profile")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"username": "plugin", "admin": false}"#)
        .create_async()
        .await;

    let client = ApiClient::new(ApiConfig::new(server.url()));
    api_client::global::install(client).unwrap();

    // Plugin code sees the same configured instance.
    let shared = api_client::global::get().expect("global client installed");
    let profile: Profile = shared.get("/api/v1/profile").await.unwrap();

    mock.assert_async().await;
    assert_eq!(profile.username, "plugin");
    assert!(api_client::global::install(ApiClient::new(ApiConfig::new("http://other"))).is_err());
}
