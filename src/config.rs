//! Client configuration sourced from the environment.

use anyhow::{Result, bail};
use std::env;

/// Environment variable that supplies the backend base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Configuration for constructing an [`ApiClient`](crate::client::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Creates a configuration with an explicit base URL.
    /// A trailing slash is trimmed so paths can always be joined with one.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Reads the base URL from the `API_BASE_URL` environment variable.
    #[tracing::instrument]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env::var(BASE_URL_ENV).ok())
    }

    fn from_lookup(value: Option<String>) -> Result<Self> {
        match value {
            Some(url) if !url.trim().is_empty() => Ok(Self::new(url)),
            Some(_) => bail!("{} environment variable is empty", BASE_URL_ENV),
            None => bail!("{} environment variable is not set", BASE_URL_ENV),
        }
    }

    /// Returns the configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
