//! Cart Service
//!
//! Cart collection: read-through query plus optimistic quantity mutations.

use std::sync::Arc;

use crate::cache::{query, with_optimistic_update, SharedCache, CART_KEY};
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{CartEnvelope, CartItem, MessageResponse, ProductRequest};

// == Cart Api ==
/// Cart surface of the storefront.
#[derive(Debug, Clone)]
pub struct CartApi {
    client: Arc<ApiClient>,
    cache: SharedCache,
}

impl CartApi {
    pub(crate) fn new(client: Arc<ApiClient>, cache: SharedCache) -> Self {
        Self { client, cache }
    }

    // == Cart ==
    /// Returns the cart collection, cached under `"cart"`.
    pub async fn cart(&self) -> Result<Vec<CartItem>> {
        let client = Arc::clone(&self.client);
        query(&self.cache, CART_KEY, move || async move {
            let envelope = client.get_json::<CartEnvelope>("cart").await?;
            Ok(envelope.into_items())
        })
        .await
    }

    // == Add ==
    /// Adds a product to the cart (or bumps its quantity).
    pub async fn add(&self, product_id: &str) -> Result<()> {
        self.mutate(product_id, "cart/add", apply_increase).await
    }

    // == Increase ==
    /// Increments a line's quantity.
    pub async fn increase(&self, product_id: &str) -> Result<()> {
        self.mutate(product_id, "cart/increase", apply_increase).await
    }

    // == Decrease ==
    /// Decrements a line's quantity; the line disappears at zero.
    pub async fn decrease(&self, product_id: &str) -> Result<()> {
        self.mutate(product_id, "cart/decrease", apply_decrease).await
    }

    // == Remove ==
    /// Drops a line regardless of quantity.
    pub async fn remove(&self, product_id: &str) -> Result<()> {
        self.mutate(product_id, "cart/remove", apply_remove).await
    }

    async fn mutate(
        &self,
        product_id: &str,
        path: &str,
        apply: fn(&mut Vec<CartItem>, &str),
    ) -> Result<()> {
        let client = Arc::clone(&self.client);
        let body = ProductRequest::new(product_id);
        let path = path.to_string();
        with_optimistic_update::<Vec<CartItem>, _, _, _>(
            &self.cache,
            CART_KEY,
            &[],
            |lines| apply(lines, product_id),
            async move { client.post_json::<MessageResponse, _>(&path, &body).await },
        )
        .await
        .map(|_| ())
    }
}

// == Optimistic Transforms ==
/// Bumps the line's quantity, creating it at quantity 1 when absent.
pub(crate) fn apply_increase(lines: &mut Vec<CartItem>, product_id: &str) {
    match lines.iter_mut().find(|line| line.product_id == product_id) {
        Some(line) => line.quantity += 1,
        None => lines.push(CartItem::new(product_id, 1)),
    }
}

/// Drops the line's quantity by one, removing it at zero. Absent lines are a
/// no-op. Quantities come straight off the wire, so a zero is possible and
/// must not underflow.
pub(crate) fn apply_decrease(lines: &mut Vec<CartItem>, product_id: &str) {
    if let Some(line) = lines.iter_mut().find(|line| line.product_id == product_id) {
        line.quantity = line.quantity.saturating_sub(1);
    }
    lines.retain(|line| line.quantity > 0);
}

/// Drops the line entirely.
pub(crate) fn apply_remove(lines: &mut Vec<CartItem>, product_id: &str) {
    lines.retain(|line| line.product_id != product_id);
}
