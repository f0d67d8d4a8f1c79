//! Services Module
//!
//! Endpoint surfaces of the storefront API, one per resource family. Every
//! call goes through the shared `ApiClient` (and so through the 401 refresh
//! protocol) and reads/writes the shared query cache.

mod auth;
mod cart;
mod favorites;
mod payment;
mod users;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use favorites::{FavoritesApi, EMPTY_FAVORITES_MESSAGE};
pub use payment::PaymentApi;
pub use users::UsersApi;

#[cfg(test)]
pub(crate) use cart::{apply_decrease, apply_increase};
#[cfg(test)]
pub(crate) use favorites::{apply_add, apply_remove};
