//! The API client: base URL, interceptor chain, and response unwrapping.

use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::auth::{AuthStore, TokenStore};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::interceptor::{BearerAuth, RequestInterceptor, RequestOptimizer};
use crate::navigation::{LOGIN_PATH, Navigator, NoopNavigator};

/// Reusable client for the backend API.
///
/// Cheap to clone; every clone shares the same connection pool, interceptor
/// chain, auth store, and navigator.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    client: Client,
    base_url: String,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
    auth: Arc<dyn AuthStore>,
    navigator: Arc<dyn Navigator>,
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    config: ApiConfig,
    client: Option<Client>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
    auth: Option<Arc<dyn AuthStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClient {
    /// Returns a builder for configuring and constructing an [`ApiClient`].
    pub fn builder(config: ApiConfig) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            client: None,
            interceptors: Vec::new(),
            auth: None,
            navigator: None,
        }
    }

    /// Creates a client with default collaborators (in-process token store,
    /// no router).
    pub fn new(config: ApiConfig) -> Self {
        Self::builder(config).build()
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.inner.client
    }

    /// Performs a GET request and returns the unwrapped JSON payload.
    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// Performs a POST request with a JSON body and returns the unwrapped
    /// JSON payload.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Performs a PUT request with a JSON body and returns the unwrapped
    /// JSON payload.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Performs a DELETE request and returns the unwrapped JSON payload.
    #[tracing::instrument(skip(self))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url_for(path);
        debug!("{} {}...", method, url);

        let mut headers = HeaderMap::new();
        for interceptor in &self.inner.interceptors {
            interceptor.on_request(&mut headers);
        }

        let mut builder = self.inner.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("No response from {}: {}", url, e);
                return Err(ApiError::NoResponse(e));
            }
        };

        self.unwrap_response(response).await
    }

    async fn unwrap_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            warn!("Session rejected by backend, redirecting to {}", LOGIN_PATH);
            self.inner.auth.logout();
            self.inner.navigator.push(LOGIN_PATH);
            return Err(ApiError::Forbidden { status });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        response.json::<T>().await.map_err(ApiError::Decode)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }
}

impl ApiClientBuilder {
    /// Uses a custom `reqwest::Client` instead of a default one.
    pub fn with_reqwest(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the auth store consulted for the bearer token and cleared on
    /// session expiry.
    pub fn with_auth_store(mut self, store: Arc<dyn AuthStore>) -> Self {
        self.auth = Some(store);
        self
    }

    /// Sets the navigator asked to show the login view on session expiry.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Appends an interceptor to the outgoing-request chain.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.add_interceptor(interceptor);
        self
    }

    /// By-reference form of [`with_interceptor`](Self::with_interceptor),
    /// usable from [`RequestOptimizer::initialize`].
    pub fn add_interceptor(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Runs the request optimizer's one-time initialization. Interceptors it
    /// registers end up ahead of the bearer-auth one.
    pub fn with_optimizer(mut self, optimizer: &dyn RequestOptimizer) -> Self {
        optimizer.initialize(&mut self);
        self
    }

    /// Builds the client, attaching the bearer-auth interceptor last.
    #[tracing::instrument(skip(self))]
    pub fn build(self) -> ApiClient {
        let auth = self.auth.unwrap_or_else(|| Arc::new(TokenStore::new()));
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(NoopNavigator));

        let mut interceptors = self.interceptors;
        interceptors.push(Arc::new(BearerAuth::new(auth.clone())));

        let client = self.client.unwrap_or_default();

        ApiClient {
            inner: Arc::new(ClientInner {
                client,
                base_url: self.config.base_url().to_string(),
                interceptors,
                auth,
                navigator,
            }),
        }
    }
}

impl std::fmt::Debug for ApiClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientBuilder")
            .field("base_url", &self.config.base_url())
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}
