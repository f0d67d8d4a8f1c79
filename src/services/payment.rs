//! Payment Service
//!
//! Order submission and gateway callback verification.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use url::form_urlencoded;

use crate::cache::{SharedCache, CART_KEY};
use crate::error::{ApiError, Result};
use crate::http::ApiClient;
use crate::models::{OrderRequest, PaymentEnvelope};

// == Payment Api ==
/// Checkout surface of the storefront.
#[derive(Debug, Clone)]
pub struct PaymentApi {
    client: Arc<ApiClient>,
    cache: SharedCache,
}

impl PaymentApi {
    pub(crate) fn new(client: Arc<ApiClient>, cache: SharedCache) -> Self {
        Self { client, cache }
    }

    // == Submit Order ==
    /// Submits the cart for payment and returns the gateway redirect URL.
    ///
    /// The cart is invalidated on success since the order consumes it.
    pub async fn submit_order(&self, cart_id: &str, callback_url: &str) -> Result<String> {
        let request = OrderRequest::new(cart_id, callback_url);
        let envelope = self
            .client
            .post_json::<PaymentEnvelope, _>("payment", &request)
            .await?;

        self.cache.write().await.invalidate(CART_KEY);

        match envelope.into_payment_url() {
            Some(url) => {
                info!(cart_id, "order submitted, redirecting to payment gateway");
                Ok(url)
            }
            None => Err(ApiError::UnexpectedResponse(
                "payment response missing payment_url".to_string(),
            )),
        }
    }

    // == Verify ==
    /// Verifies a payment gateway callback.
    pub async fn verify(&self, authority: &str, status: &str) -> Result<Value> {
        self.client
            .get_json::<Value>(&callback_path(authority, status))
            .await
    }
}

/// Builds the callback verification path. The gateway controls both values,
/// so they are percent-encoded rather than interpolated raw.
fn callback_path(authority: &str, status: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("authority", authority)
        .append_pair("status", status)
        .finish();
    format!("payment/callback?{}", query)
}
