//! Talon HTTP Client
//!
//! A type-safe HTTP client for the remote hiring gateway.
//!
//! The gateway exposes two GraphQL read operations (posting search, slot
//! search) and one REST write operation (create-application). This crate
//! owns request construction and response decoding; everything above it
//! works with `talon-core` domain types.
//!
//! # Example
//!
//! ```no_run
//! use talon_client::HiringClient;
//! use talon_core::dto::search::SearchFilter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = HiringClient::new("https://gateway.example.com");
//!
//!     let postings = client.search_job_postings(&SearchFilter::default()).await?;
//!     println!("found {} postings", postings.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod applications;
mod postings;
mod slots;

// Re-export commonly used types
pub use error::{ClientError, Result};

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use talon_core::dto::search::{GraphqlRequest, GraphqlResponse};

/// Locale sent with every search request
pub(crate) const LOCALE: &str = "en-CA";

/// Country sent with every search request
pub(crate) const COUNTRY: &str = "Canada";

/// Default bound applied to every gateway call
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the hiring gateway
///
/// Every request carries a per-call timeout so a stalled gateway call
/// surfaces as a failed result instead of hanging the cycle.
#[derive(Debug, Clone)]
pub struct HiringClient {
    /// Base URL of the gateway (e.g. "https://gateway.example.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Per-request timeout applied to every call
    request_timeout: Duration,
}

impl HiringClient {
    /// Create a new gateway client with the default request timeout
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the gateway
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new gateway client with a custom HTTP client
    ///
    /// This allows configuring proxies, TLS settings, default headers, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Get the base URL of the gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Post a GraphQL request and unwrap the response envelope
    ///
    /// A missing `data` field is treated the same way as a transport fault:
    /// the call fails and the caller decides how far the failure spreads.
    pub(crate) async fn post_graphql<T: DeserializeOwned>(
        &self,
        request: &GraphqlRequest,
    ) -> Result<T> {
        let url = format!("{}/graphql", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let envelope: GraphqlResponse<T> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("failed to parse GraphQL response: {}", e))
        })?;

        envelope.data.ok_or_else(|| {
            ClientError::ParseError(format!(
                "GraphQL response for {} carried no data",
                request.operation_name
            ))
        })
    }

    /// Handle a REST response that returns no useful body
    pub(crate) async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HiringClient::new("https://gateway.example.com");
        assert_eq!(client.base_url(), "https://gateway.example.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = HiringClient::new("https://gateway.example.com/");
        assert_eq!(client.base_url(), "https://gateway.example.com");
    }

    #[test]
    fn test_request_timeout_override() {
        let client =
            HiringClient::new("https://gateway.example.com").request_timeout(Duration::from_secs(3));
        assert_eq!(client.request_timeout, Duration::from_secs(3));
    }
}
