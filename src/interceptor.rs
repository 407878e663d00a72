//! Outgoing-request interceptors.

use log::warn;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::sync::Arc;

use crate::auth::AuthStore;
use crate::client::ApiClientBuilder;

/// Hook that observes and mutates the headers of every outgoing request.
///
/// Interceptors run in registration order. The built-in bearer-auth
/// interceptor is always appended last, so optimizer-registered ones see the
/// request first.
#[cfg_attr(test, mockall::automock)]
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, headers: &mut HeaderMap);
}

/// Entry point of the external request optimizer.
///
/// `initialize` is invoked exactly once while the client is being built,
/// before the bearer-auth interceptor attaches.
pub trait RequestOptimizer {
    fn initialize(&self, builder: &mut ApiClientBuilder);
}

/// Sets `Authorization: Bearer <token>` when the auth store holds a token.
/// Requests without a token pass through untouched.
pub struct BearerAuth {
    store: Arc<dyn AuthStore>,
}

impl BearerAuth {
    pub fn new(store: Arc<dyn AuthStore>) -> Self {
        Self { store }
    }
}

impl RequestInterceptor for BearerAuth {
    fn on_request(&self, headers: &mut HeaderMap) {
        let Some(token) = self.store.token() else {
            return;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                warn!("Stored token is not a valid header value, sending request unauthenticated");
            }
        }
    }
}
