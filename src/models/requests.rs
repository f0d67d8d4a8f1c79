//! Request DTOs for the storefront API
//!
//! Defines the structure of outgoing HTTP request bodies. Field names follow
//! the server's camelCase wire format.

use serde::Serialize;

/// Request body for the OTP endpoints (POST auth/get-otp)
#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest {
    /// Mobile number the one-time code is sent to
    pub mobile: String,
}

impl OtpRequest {
    pub fn new(mobile: impl Into<String>) -> Self {
        Self {
            mobile: mobile.into(),
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.mobile.trim().is_empty() {
            return Some("Mobile number cannot be empty".to_string());
        }
        None
    }
}

/// Request body for OTP verification (POST auth/check-otp)
#[derive(Debug, Clone, Serialize)]
pub struct CheckOtpRequest {
    pub mobile: String,
    pub code: String,
}

impl CheckOtpRequest {
    pub fn new(mobile: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            mobile: mobile.into(),
            code: code.into(),
        }
    }
}

/// Request body for the saved-items and cart mutation endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ProductRequest {
    /// The product the mutation applies to
    #[serde(rename = "productId")]
    pub product_id: String,
}

impl ProductRequest {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
        }
    }
}

/// Request body for order submission (POST payment)
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    #[serde(rename = "cartId")]
    pub cart_id: String,
    /// Where the payment gateway redirects after checkout
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,
}

impl OrderRequest {
    pub fn new(cart_id: impl Into<String>, callback_url: impl Into<String>) -> Self {
        Self {
            cart_id: cart_id.into(),
            callback_url: callback_url.into(),
        }
    }
}
