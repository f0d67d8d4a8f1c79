//! Favorites Service
//!
//! Saved-items collection: read-through query plus optimistic mutations.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{
    favorite_status_key, query, with_optimistic_update, SharedCache, CART_KEY, FAVORITES_KEY,
};
use crate::error::{ApiError, Result};
use crate::http::ApiClient;
use crate::models::{
    FavoriteItem, MessageResponse, ProductRequest, SavedItemsEnvelope, SavedStatusEnvelope,
};

/// Exact server message for a 400 on GET saved-items that means "the list is
/// empty", mapped to an empty collection rather than an error.
pub const EMPTY_FAVORITES_MESSAGE: &str = "هیچ محصولی در لیست مورد علاقه ها نیست";

// == Favorites Api ==
/// Favorites surface of the storefront.
#[derive(Debug, Clone)]
pub struct FavoritesApi {
    client: Arc<ApiClient>,
    cache: SharedCache,
}

impl FavoritesApi {
    pub(crate) fn new(client: Arc<ApiClient>, cache: SharedCache) -> Self {
        Self { client, cache }
    }

    // == Favorites ==
    /// Returns the favorites collection, cached under `"favorites"`.
    pub async fn favorites(&self) -> Result<Vec<FavoriteItem>> {
        let client = Arc::clone(&self.client);
        query(&self.cache, FAVORITES_KEY, move || async move {
            fetch_favorites(&client).await
        })
        .await
    }

    // == Add ==
    /// Adds a product to favorites with an optimistic local insert.
    ///
    /// Adding a product that is already present is a local no-op; the network
    /// call still goes out (there is no server-side idempotency key) but the
    /// collection never holds two entries for one product.
    pub async fn add(&self, product_id: &str) -> Result<()> {
        let client = Arc::clone(&self.client);
        let body = ProductRequest::new(product_id);
        with_optimistic_update::<Vec<FavoriteItem>, _, _, _>(
            &self.cache,
            FAVORITES_KEY,
            &[],
            |items| apply_add(items, product_id),
            async move {
                client
                    .post_json::<MessageResponse, _>("saved-items/save", &body)
                    .await
            },
        )
        .await
        .map(|_| ())
    }

    // == Remove ==
    /// Removes a product from favorites with an optimistic local filter.
    ///
    /// Removing an absent product is a silent local no-op.
    pub async fn remove(&self, product_id: &str) -> Result<()> {
        let client = Arc::clone(&self.client);
        let body = ProductRequest::new(product_id);
        with_optimistic_update::<Vec<FavoriteItem>, _, _, _>(
            &self.cache,
            FAVORITES_KEY,
            &[],
            |items| apply_remove(items, product_id),
            async move {
                client
                    .post_json::<MessageResponse, _>("saved-items/remove", &body)
                    .await
            },
        )
        .await
        .map(|_| ())
    }

    // == Is Saved ==
    /// Checks whether a product is saved, cached per product.
    pub async fn is_saved(&self, product_id: &str) -> Result<bool> {
        let key = favorite_status_key(product_id);
        let client = Arc::clone(&self.client);
        let body = ProductRequest::new(product_id);
        query(&self.cache, &key, move || async move {
            let envelope = client
                .post_json::<SavedStatusEnvelope, _>("saved-items/is-saved", &body)
                .await?;
            Ok(envelope.into_bool())
        })
        .await
    }

    // == Clear ==
    /// Empties the favorites collection.
    ///
    /// Invalidates the cart too, since the server may have moved items there.
    pub async fn clear(&self) -> Result<()> {
        let client = Arc::clone(&self.client);
        with_optimistic_update::<Vec<FavoriteItem>, _, _, _>(
            &self.cache,
            FAVORITES_KEY,
            &[CART_KEY],
            |items| items.clear(),
            async move {
                client
                    .delete_json::<MessageResponse>("saved-items/clear")
                    .await
            },
        )
        .await
        .map(|_| ())
    }

    // == Add To Cart ==
    /// Moves a favorite into the cart.
    ///
    /// Both collections change server-side, so both keys are invalidated.
    pub async fn add_to_cart(&self, product_id: &str) -> Result<()> {
        let client = Arc::clone(&self.client);
        let body = ProductRequest::new(product_id);
        with_optimistic_update::<Vec<FavoriteItem>, _, _, _>(
            &self.cache,
            FAVORITES_KEY,
            &[CART_KEY],
            |items| apply_remove(items, product_id),
            async move {
                client
                    .post_json::<MessageResponse, _>("saved-items/add-to-cart", &body)
                    .await
            },
        )
        .await
        .map(|_| ())
    }
}

// == Fetch ==
/// Fetches and normalizes the favorites collection.
async fn fetch_favorites(client: &ApiClient) -> Result<Vec<FavoriteItem>> {
    match client.get_json::<SavedItemsEnvelope>("saved-items").await {
        Ok(envelope) => Ok(envelope.into_items()),
        // The server reports an empty list as a 400 with a known message
        Err(ApiError::Status { status: 400, message }) if message == EMPTY_FAVORITES_MESSAGE => {
            debug!("server reports no saved items, returning empty collection");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

// == Optimistic Transforms ==
/// Appends a synthetic entry unless the product is already present.
pub(crate) fn apply_add(items: &mut Vec<FavoriteItem>, product_id: &str) {
    if items.iter().any(|item| item.product_id == product_id) {
        return;
    }
    items.push(FavoriteItem::synthetic(product_id));
}

/// Filters out every entry for the product.
pub(crate) fn apply_remove(items: &mut Vec<FavoriteItem>, product_id: &str) {
    items.retain(|item| item.product_id != product_id);
}
