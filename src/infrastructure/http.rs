use crate::config::CheckoutConfig;
use crate::domain::ports::{CheckoutTransport, TransportResponse};
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use reqwest::Client;

/// [`CheckoutTransport`] backed by `reqwest`.
///
/// Sends JSON with `Content-Type: application/json` and an `Authorization: Bearer`
/// header. Non-success statuses are returned as responses, not errors.
#[derive(Clone)]
pub struct HttpCheckoutTransport {
    client: Client,
}

impl HttpCheckoutTransport {
    /// Builds the underlying HTTP client, applying the configured timeout.
    pub fn new(config: &CheckoutConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StorefrontError::TransportError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CheckoutTransport for HttpCheckoutTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer_token: &str,
        body: serde_json::Value,
    ) -> Result<TransportResponse> {
        let response = self
            .client
            .post(url)
            .bearer_auth(bearer_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StorefrontError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| StorefrontError::TransportError(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}
