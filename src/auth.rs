//! Shared authentication session state.

use std::sync::RwLock;

/// Read access to the current auth token plus session teardown.
///
/// The request pipeline reads the token on every outgoing call; `logout` is
/// invoked when the backend reports the session as no longer valid.
#[cfg_attr(test, mockall::automock)]
pub trait AuthStore: Send + Sync {
    /// Returns the current bearer token, if a session is active.
    fn token(&self) -> Option<String>;

    /// Clears the stored session state.
    fn logout(&self);
}

/// In-process token holder backing the default [`AuthStore`].
#[derive(Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the token used for subsequent authenticated requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }
}

impl AuthStore for TokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn logout(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.token().is_some() {
            "REDACTED"
        } else {
            "None"
        };
        write!(f, "TokenStore {{ token: {} }}", state)
    }
}
