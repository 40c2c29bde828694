use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies the bearer token of the signed-in user.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn bearer_token(&self) -> Result<String>;
}

/// Raw HTTP response handed back by a [`CheckoutTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Minimal HTTP client needed to create checkout sessions.
///
/// Implementations return `Err` only for transport-level failures. Any response
/// that arrives, whatever its status, is returned as a [`TransportResponse`].
#[async_trait]
pub trait CheckoutTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        bearer_token: &str,
        body: serde_json::Value,
    ) -> Result<TransportResponse>;
}

pub type CredentialProviderRef = Arc<dyn CredentialProvider>;
pub type CheckoutTransportRef = Arc<dyn CheckoutTransport>;
