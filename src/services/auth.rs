//! Auth Service
//!
//! OTP login flow and session termination.

use std::sync::Arc;

use tracing::info;

use crate::error::{ApiError, Result};
use crate::http::ApiClient;
use crate::models::{CheckOtpRequest, MessageResponse, OtpRequest};

// == Auth Api ==
/// Authentication surface of the storefront.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    // == Send Otp ==
    /// Requests a one-time code for a mobile number.
    pub async fn send_otp(&self, mobile: &str) -> Result<()> {
        let request = OtpRequest::new(mobile);
        if let Some(message) = request.validate() {
            return Err(ApiError::InvalidRequest(message));
        }

        self.client
            .post_json::<MessageResponse, _>("auth/get-otp", &request)
            .await
            .map(|_| ())
    }

    // == Check Otp ==
    /// Verifies the one-time code and establishes the session.
    ///
    /// A confirmed authentication resets the logged-out flag, so requests
    /// issued right after a login are not fail-fast rejected.
    pub async fn check_otp(&self, mobile: &str, code: &str) -> Result<()> {
        let request = CheckOtpRequest::new(mobile, code);
        self.client
            .post_json::<MessageResponse, _>("auth/check-otp", &request)
            .await?;

        self.client.login();
        info!("session established");
        Ok(())
    }

    // == Logout ==
    /// Terminates the session via the client's logout protocol.
    pub async fn logout(&self) -> Result<()> {
        self.client.logout().await
    }
}
