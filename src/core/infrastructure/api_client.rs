//! HTTP client for the two-branch backend passthrough.

use crate::core::domain::{
    error::{DashboardError, DashboardResult},
    model::dashboard_config::DashboardConfig,
    value_object::{DashboardUrl, EndpointKind},
};
use crate::core::infrastructure::source::DashboardSource;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, StatusCode};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

/// Client for the backend's `?type=data` / `?type=stats` endpoints.
///
/// Bodies are returned verbatim as JSON. Backend-reported failures (a JSON
/// object with an `error` key, with or without a success status) are turned
/// into [`DashboardError::Backend`]. No timeout and no retry are applied:
/// the poll cadence is the retry.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: Arc<DashboardUrl>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient` for the given backend.
    ///
    /// # Errors
    /// Returns `DashboardError::Connection` if the HTTP client cannot be built.
    pub fn new(base_url: DashboardUrl, config: &DashboardConfig) -> DashboardResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| DashboardError::Connection(e.to_string()))?;

        let rate_limiter = config.rate_limit.map(|rl| {
            let per_second = NonZeroU32::new(rl.requests_per_second).unwrap_or(NonZeroU32::MIN);
            let burst = NonZeroU32::new(rl.burst_size).unwrap_or(NonZeroU32::MIN);
            Arc::new(DefaultDirectRateLimiter::direct(
                Quota::per_second(per_second).allow_burst(burst),
            ))
        });

        Ok(Self {
            http_client,
            base_url: Arc::new(base_url),
            rate_limiter,
        })
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &DashboardUrl {
        &self.base_url
    }

    /// Performs a GET against one endpoint and returns its JSON body.
    ///
    /// # Errors
    /// Returns `DashboardError::Connection` when the request fails or the body is
    /// not JSON, and `DashboardError::Backend` when the backend reports an error.
    pub async fn get(&self, kind: EndpointKind) -> DashboardResult<serde_json::Value> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.base_url.endpoint(kind);
        debug!(%url, "fetching {}", kind);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| DashboardError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DashboardError::Connection(format!("Failed to read response: {}", e)))?;

        let parsed = serde_json::from_slice::<serde_json::Value>(&body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(backend_or_connection(status, message));
        }

        let value = parsed
            .map_err(|e| DashboardError::Connection(format!("Failed to parse response: {}", e)))?;

        if let Some(message) = error_message(&value) {
            return Err(DashboardError::Backend { status, message });
        }

        Ok(value)
    }
}

/// The `error` field of a backend error object, if the body is one.
fn error_message(value: &serde_json::Value) -> Option<String> {
    let error = value.as_object()?.get("error")?;
    Some(match error.as_str() {
        Some(text) => text.to_string(),
        None => error.to_string(),
    })
}

fn backend_or_connection(status: StatusCode, message: String) -> DashboardError {
    if status.is_server_error() || status.is_client_error() {
        DashboardError::Backend { status, message }
    } else {
        DashboardError::Connection(format!("API error ({}): {}", status, message))
    }
}

#[async_trait]
impl DashboardSource for ApiClient {
    async fn fetch(&self, kind: EndpointKind) -> DashboardResult<serde_json::Value> {
        self.get(kind).await
    }
}
