//! Authenticated HTTP client for the backend API.
//!
//! Wires a bearer token from a shared auth store onto every outgoing request,
//! unwraps successful responses to their JSON payload, and redirects to the
//! login view when the backend reports the session as no longer valid.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod global;
pub mod interceptor;
pub mod navigation;
