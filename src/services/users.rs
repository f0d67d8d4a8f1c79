//! Users Service
//!
//! Session probe against the profile endpoint.

use std::sync::Arc;

use crate::cache::{query, SharedCache, PROFILE_KEY};
use crate::http::ApiClient;
use crate::models::UserProfile;

// == Users Api ==
/// User profile surface of the storefront.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: Arc<ApiClient>,
    cache: SharedCache,
}

impl UsersApi {
    pub(crate) fn new(client: Arc<ApiClient>, cache: SharedCache) -> Self {
        Self { client, cache }
    }

    // == Profile ==
    /// Probes the current session, cached under `"profile"`.
    ///
    /// Any failure means "not logged in", not a hard error, so the result is
    /// an Option rather than a Result.
    pub async fn profile(&self) -> Option<UserProfile> {
        let client = Arc::clone(&self.client);
        query(&self.cache, PROFILE_KEY, move || async move {
            client.get_json::<UserProfile>("user/profile").await
        })
        .await
        .ok()
    }
}
