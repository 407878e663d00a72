//! Process-wide client handle for plugin reuse.
//!
//! The application configures one [`ApiClient`] at startup and publishes it
//! here so plugin code can reuse the same instance, connection pool and
//! interceptors included. The handle lives for the process lifetime.

use anyhow::{Result, bail};
use std::sync::OnceLock;

use crate::client::ApiClient;

static GLOBAL_CLIENT: OnceLock<ApiClient> = OnceLock::new();

/// Publishes the client for process-wide reuse.
/// Fails if a client was already installed.
#[tracing::instrument(skip(client))]
pub fn install(client: ApiClient) -> Result<()> {
    if GLOBAL_CLIENT.set(client).is_err() {
        bail!("A global API client is already installed");
    }
    Ok(())
}

/// Returns the installed client, if any.
pub fn get() -> Option<&'static ApiClient> {
    GLOBAL_CLIENT.get()
}
