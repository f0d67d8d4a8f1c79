//! HTTP Module
//!
//! Authenticated transport for the storefront API.
//!
//! # Components
//! - `ApiClient` - credential-bearing client with the 401 refresh protocol
//! - `SessionState` - explicit ACTIVE/LOGGED_OUT state machine gating refresh

mod client;
mod session;

pub use client::ApiClient;
pub use session::SessionState;
