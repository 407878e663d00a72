//! Navigation seam toward the host application's router.

use log::debug;

/// Path of the login view shown when the session expires.
pub const LOGIN_PATH: &str = "/login";

/// Requests page transitions from the host application's router.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Requests a transition to the given path.
    fn push(&self, path: &str);
}

/// Navigator for hosts without a router; logs and drops the transition.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn push(&self, path: &str) {
        debug!("Navigation to {} ignored (no router attached)", path);
    }
}
