//! Response DTOs for the storefront API
//!
//! Defines the structure of incoming HTTP response bodies, including the
//! nested envelopes the server wraps collections in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::items::{CartItem, FavoriteItem};

/// Generic JSON error body; most error responses carry a `message` field.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

/// Generic acknowledgement body for mutations whose payload we do not use.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// == Saved Items ==
/// Envelope of GET saved-items: `{"data": {"savedItems": {"items": [...]}}}`.
///
/// Every level is optional; a missing level means an empty collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedItemsEnvelope {
    #[serde(default)]
    pub data: Option<SavedItemsData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedItemsData {
    #[serde(default, rename = "savedItems")]
    pub saved_items: Option<SavedItemsList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedItemsList {
    #[serde(default)]
    pub items: Vec<RawSavedItem>,
}

impl SavedItemsEnvelope {
    /// Unwraps the envelope into normalized favorite items.
    pub fn into_items(self) -> Vec<FavoriteItem> {
        self.data
            .and_then(|data| data.saved_items)
            .map(|list| list.items.into_iter().map(RawSavedItem::normalize).collect())
            .unwrap_or_default()
    }
}

/// A favorite record as the server sends it.
///
/// The API is inconsistent about the product reference: some records carry a
/// populated `{"_id": ...}` object, others a bare id string. `normalize`
/// collapses both into the canonical `FavoriteItem`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSavedItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "productId")]
    pub product_id: ProductRef,
    #[serde(rename = "savedAt")]
    pub saved_at: DateTime<Utc>,
}

/// The two wire shapes a product reference arrives in.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Wrapped {
        #[serde(rename = "_id")]
        id: String,
    },
    Bare(String),
}

impl ProductRef {
    pub fn id(&self) -> &str {
        match self {
            ProductRef::Wrapped { id } => id,
            ProductRef::Bare(id) => id,
        }
    }
}

impl RawSavedItem {
    /// Converts the inbound record to the canonical shape.
    pub fn normalize(self) -> FavoriteItem {
        let product_id = self.product_id.id().to_string();
        FavoriteItem {
            id: self.id,
            product_id,
            saved_at: self.saved_at,
        }
    }
}

// == Saved Status ==
/// Envelope of POST saved-items/is-saved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedStatusEnvelope {
    #[serde(default)]
    pub data: Option<SavedStatusData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedStatusData {
    #[serde(default, rename = "isSaved")]
    pub is_saved: bool,
}

impl SavedStatusEnvelope {
    pub fn into_bool(self) -> bool {
        self.data.map(|data| data.is_saved).unwrap_or(false)
    }
}

// == Cart ==
/// Envelope of GET cart, symmetric with the saved-items envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartEnvelope {
    #[serde(default)]
    pub data: Option<CartData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartData {
    #[serde(default)]
    pub cart: Option<CartList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartList {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl CartEnvelope {
    pub fn into_items(self) -> Vec<CartItem> {
        self.data
            .and_then(|data| data.cart)
            .map(|list| list.items)
            .unwrap_or_default()
    }
}

// == User Profile ==
/// Session probe payload from GET user/profile.
///
/// Cached under the profile key, so it round-trips through JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub mobile: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// == Payment ==
/// Envelope of POST payment: carries the gateway redirect URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentEnvelope {
    #[serde(default)]
    pub data: Option<PaymentData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentData {
    #[serde(default)]
    pub payment_url: Option<String>,
}

impl PaymentEnvelope {
    pub fn into_payment_url(self) -> Option<String> {
        self.data.and_then(|data| data.payment_url)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_items_envelope() {
        let json = r#"{
            "data": {
                "savedItems": {
                    "items": [
                        {"_id": "a", "productId": {"_id": "p1"}, "savedAt": "2024-05-01T10:00:00Z"},
                        {"_id": "b", "productId": "p2", "savedAt": "2024-05-02T10:00:00Z"}
                    ]
                }
            }
        }"#;
        let envelope: SavedItemsEnvelope = serde_json::from_str(json).unwrap();
        let items = envelope.into_items();

        assert_eq!(items.len(), 2);
        // Both wire shapes normalize to the bare product id
        assert_eq!(items[0].product_id, "p1");
        assert_eq!(items[1].product_id, "p2");
        assert_eq!(items[0].id, "a");
    }

    #[test]
    fn test_saved_items_envelope_missing_levels() {
        let envelope: SavedItemsEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.into_items().is_empty());

        let envelope: SavedItemsEnvelope = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(envelope.into_items().is_empty());
    }

    #[test]
    fn test_product_ref_shapes() {
        let wrapped: ProductRef = serde_json::from_str(r#"{"_id": "x"}"#).unwrap();
        assert_eq!(wrapped.id(), "x");

        let bare: ProductRef = serde_json::from_str(r#""y""#).unwrap();
        assert_eq!(bare.id(), "y");
    }

    #[test]
    fn test_error_body_defaults() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_empty());

        let body: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert_eq!(body.message, "nope");
    }

    #[test]
    fn test_cart_envelope() {
        let json = r#"{"data": {"cart": {"items": [{"productId": "p1", "quantity": 2}]}}}"#;
        let envelope: CartEnvelope = serde_json::from_str(json).unwrap();
        let items = envelope.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_payment_envelope() {
        let json = r#"{"data": {"payment_url": "https://gateway.example/pay/123"}}"#;
        let envelope: PaymentEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(
            envelope.into_payment_url().as_deref(),
            Some("https://gateway.example/pay/123")
        );

        let empty: PaymentEnvelope = serde_json::from_str("{}").unwrap();
        assert!(empty.into_payment_url().is_none());
    }

    #[test]
    fn test_saved_status_envelope() {
        let json = r#"{"data": {"isSaved": true}}"#;
        let envelope: SavedStatusEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.into_bool());

        let empty: SavedStatusEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!empty.into_bool());
    }
}
