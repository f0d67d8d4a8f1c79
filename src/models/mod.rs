//! Request and Response models for the storefront API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, plus the
//! canonical item shapes stored in the query cache.

pub mod items;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use items::{CartItem, FavoriteItem, TEMP_ID_PREFIX};
pub use requests::{CheckOtpRequest, OrderRequest, OtpRequest, ProductRequest};
pub use responses::{
    CartEnvelope, ErrorBody, MessageResponse, PaymentEnvelope, SavedItemsEnvelope,
    SavedStatusEnvelope, UserProfile,
};
