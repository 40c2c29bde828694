#![allow(dead_code)]

use async_trait::async_trait;
use hotel_storefront::application::checkout::CheckoutSessionController;
use hotel_storefront::config::CheckoutConfig;
use hotel_storefront::domain::listing::ListingRecord;
use hotel_storefront::domain::ports::{CredentialProvider, TransportResponse};
use hotel_storefront::error::{Result, StorefrontError};
use hotel_storefront::infrastructure::credentials::StaticTokenProvider;
use hotel_storefront::infrastructure::in_memory::InMemoryTransport;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

pub fn listing(id: &str, location: &str, price: Decimal, rating: Decimal) -> ListingRecord {
    ListingRecord::new(id)
        .with_location(location)
        .with_price(price)
        .with_rating(rating)
}

pub fn session_ok(secret: &str) -> TransportResponse {
    TransportResponse::new(200, format!(r#"{{"clientSecret":"{secret}"}}"#))
}

pub fn server_error() -> TransportResponse {
    TransportResponse::new(500, r#"{"message":"Internal Server Error"}"#)
}

/// Credential provider for a signed-out user.
pub struct SignedOutProvider;

#[async_trait]
impl CredentialProvider for SignedOutProvider {
    async fn bearer_token(&self) -> Result<String> {
        Err(StorefrontError::CredentialError(
            "session expired".to_string(),
        ))
    }
}

pub fn controller(transport: &InMemoryTransport) -> CheckoutSessionController {
    CheckoutSessionController::new(
        CheckoutConfig::new("https://payments.test"),
        Arc::new(StaticTokenProvider::new("tok_abc")),
        Arc::new(transport.clone()),
    )
}

/// Waits until the transport has seen `count` requests.
pub async fn wait_for_requests(transport: &InMemoryTransport, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while transport.requests().await.len() < count {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("transport never received the expected requests");
}
