//! Canonical item shapes stored in the query cache.
//!
//! Inbound favorite records arrive in two shapes (a wrapped
//! `{"productId": {"_id": ...}}` object or a bare id string); they are
//! normalized to `FavoriteItem` at the cache boundary so downstream logic
//! never shape-checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of synthetic ids given to optimistic entries before the server
/// confirms them.
pub const TEMP_ID_PREFIX: &str = "temp-";

// == Favorite Item ==
/// One entry of the favorites collection, in canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    /// Server id, or a synthetic `temp-` id pending confirmation
    pub id: String,
    pub product_id: String,
    pub saved_at: DateTime<Utc>,
}

impl FavoriteItem {
    /// Creates a synthetic entry for an optimistic add.
    ///
    /// The id is built from the product id and the current millisecond clock,
    /// distinct from any server id; the whole entry is replaced by server
    /// truth on the post-mutation refetch.
    pub fn synthetic(product_id: impl Into<String>) -> Self {
        let product_id = product_id.into();
        let now = Utc::now();
        Self {
            id: format!("{}{}-{}", TEMP_ID_PREFIX, product_id, now.timestamp_millis()),
            product_id,
            saved_at: now,
        }
    }

    /// True for optimistic entries not yet confirmed by the server.
    pub fn is_temporary(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }
}

// == Cart Item ==
/// One line of the cart collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}
