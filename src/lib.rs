//! Storefront Client - core library for a storefront REST API
//!
//! Provides an authenticated HTTP client with a one-shot token
//! refresh-and-retry protocol, and an optimistic query cache for the
//! favorites and cart collections.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod storefront;
pub mod tasks;

pub use config::Config;
pub use error::{ApiError, Result};
pub use http::{ApiClient, SessionState};
pub use storefront::Storefront;
pub use tasks::spawn_revalidate_task;
