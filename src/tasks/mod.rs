//! Background Tasks Module
//!
//! Contains background tasks that run for the client's lifetime.
//!
//! # Tasks
//! - Revalidation: marks elapsed cache entries stale at configured intervals

mod revalidate;

pub use revalidate::spawn_revalidate_task;
