//! Authenticated HTTP Client
//!
//! Issues credential-bearing requests against the storefront API and
//! transparently recovers from access-token expiry exactly once per request.
//!
//! # Refresh Protocol
//! A 401 response for a request that has not already been retried, while the
//! session is active, triggers a token refresh followed by a single retry of
//! the original request. Concurrent 401s coalesce behind one in-flight
//! refresh: a request that observes a refresh completed since it was
//! dispatched skips the refresh call and retries directly.

use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::http::SessionState;
use crate::models::ErrorBody;

/// Relative path of the token refresh endpoint.
const REFRESH_PATH: &str = "auth/refresh-token";

/// Relative path of the logout endpoint.
const LOGOUT_PATH: &str = "auth/logout";

// == Api Client ==
/// Shared HTTP client for the storefront REST API.
///
/// Credentials are cookie-based and ride the client's cookie store; every
/// request includes them. All endpoints are subject to the same 401 refresh
/// protocol, with no per-endpoint exceptions.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionState,
    /// Incremented after every successful refresh; used to coalesce
    /// concurrent refresh attempts into a single call.
    refresh_generation: Mutex<u64>,
    logout_cooldown: Duration,
}

impl ApiClient {
    // == Constructor ==
    /// Creates a new client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: SessionState::new(),
            refresh_generation: Mutex::new(0),
            logout_cooldown: config.logout_cooldown(),
        })
    }

    /// Returns the session state shared with this client.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // == Request ==
    /// Issues a request, recovering from token expiry at most once.
    ///
    /// Returns the final HTTP response, including the retried request's
    /// response whatever its status. Only a refresh failure replaces the
    /// response with an error; the session is then logged out and stays so
    /// until `login` is called.
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response> {
        let observed = *self.refresh_generation.lock().await;

        let response = self.dispatch(method.clone(), path, body).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // Fail fast after a known-dead session: no refresh storms
        if self.session.is_logged_out() {
            debug!(path, "401 while logged out, propagating without refresh");
            return Ok(response);
        }

        self.refresh_session(observed).await?;

        debug!(path, "retrying request after token refresh");
        self.dispatch(method, path, body).await
    }

    // == Refresh Session ==
    /// Exchanges the expired credential for a new one, once.
    ///
    /// `observed` is the refresh generation captured when the failing request
    /// was dispatched; if the generation moved on since, another request
    /// already refreshed the session and this call is a no-op.
    async fn refresh_session(&self, observed: u64) -> Result<()> {
        let mut generation = self.refresh_generation.lock().await;
        if *generation != observed {
            debug!("token refresh already completed by a concurrent request");
            return Ok(());
        }

        // A logout may have raced us to the lock
        if self.session.is_logged_out() {
            return Err(ApiError::Unauthorized("session was logged out".to_string()));
        }

        info!("access token expired, refreshing session");
        let response = match self.dispatch(Method::POST, REFRESH_PATH, None).await {
            Ok(response) => response,
            Err(err) => {
                self.session.mark_logged_out();
                warn!("token refresh failed to reach the server, session is dead");
                return Err(ApiError::RefreshFailed(Box::new(err)));
            }
        };

        if !response.status().is_success() {
            self.session.mark_logged_out();
            warn!(
                status = response.status().as_u16(),
                "token refresh rejected, session is dead"
            );
            return Err(ApiError::RefreshFailed(Box::new(Self::status_error(response).await)));
        }

        *generation += 1;
        debug!("session refreshed");
        Ok(())
    }

    // == Dispatch ==
    /// Sends a single request without any retry handling.
    async fn dispatch(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    // == Login ==
    /// Resets the session to active, called after a confirmed authentication.
    pub fn login(&self) {
        self.session.login();
    }

    // == Logout ==
    /// Terminates the session.
    ///
    /// The logged-out flag is set before the server call so refresh attempts
    /// from in-flight requests are blocked immediately. The cooldown starts
    /// regardless of the call's outcome, so a subsequent login is not blocked
    /// by the stale flag; the server error, if any, is still propagated.
    pub async fn logout(&self) -> Result<()> {
        self.session.mark_logged_out();
        info!("logging out, refresh attempts suspended");

        let result = self.request(Method::POST, LOGOUT_PATH, None).await;
        self.session.start_cooldown(self.logout_cooldown);

        match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(Self::status_error(response).await),
            Err(err) => Err(err),
        }
    }

    // == Typed Helpers ==
    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path, None).await?;
        Self::parse_response(response).await
    }

    /// POST a JSON body, decoding the JSON response.
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let response = self.request(Method::POST, path, Some(&body)).await?;
        Self::parse_response(response).await
    }

    /// DELETE a resource, decoding the JSON response.
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::DELETE, path, None).await?;
        Self::parse_response(response).await
    }

    // == Response Parsing ==
    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// Converts an error response into an `ApiError`, extracting the server's
    /// `message` field when the body is the usual JSON error envelope.
    async fn status_error(response: Response) -> ApiError {
        let status = response.status();
        let message = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or(text),
            Err(_) => String::new(),
        };

        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
