use crate::domain::ports::{CheckoutTransport, TransportResponse};
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, RwLock};

#[derive(Clone)]
enum ScriptedReply {
    Respond(TransportResponse),
    Delayed(Duration, TransportResponse),
    Gated(Arc<Notify>, TransportResponse),
    Fail(String),
}

/// A request observed by [`InMemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub bearer_token: String,
    pub body: serde_json::Value,
}

/// A scripted, in-memory stand-in for the payment service.
///
/// Replies are keyed by the `bookingId` found in the request body and can be
/// replaced at any time. Unknown bookings get a `404`. Every request is recorded.
#[derive(Default, Clone)]
pub struct InMemoryTransport {
    replies: Arc<RwLock<HashMap<String, ScriptedReply>>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

impl InMemoryTransport {
    /// Creates a new in-memory transport with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies immediately with `response` for `booking_id`.
    pub async fn respond(&self, booking_id: &str, response: TransportResponse) {
        self.script(booking_id, ScriptedReply::Respond(response)).await;
    }

    /// Replies after `delay` has elapsed on the tokio clock.
    pub async fn respond_after(&self, booking_id: &str, delay: Duration, response: TransportResponse) {
        self.script(booking_id, ScriptedReply::Delayed(delay, response))
            .await;
    }

    /// Holds the reply until `gate` is notified.
    pub async fn respond_when(
        &self,
        booking_id: &str,
        gate: Arc<Notify>,
        response: TransportResponse,
    ) {
        self.script(booking_id, ScriptedReply::Gated(gate, response))
            .await;
    }

    /// Fails at the transport level, as a refused connection would.
    pub async fn fail(&self, booking_id: &str, message: &str) {
        self.script(booking_id, ScriptedReply::Fail(message.to_string()))
            .await;
    }

    /// Every request seen so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    async fn script(&self, booking_id: &str, reply: ScriptedReply) {
        let mut replies = self.replies.write().await;
        replies.insert(booking_id.to_string(), reply);
    }
}

#[async_trait]
impl CheckoutTransport for InMemoryTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer_token: &str,
        body: serde_json::Value,
    ) -> Result<TransportResponse> {
        let booking_id = body
            .get("bookingId")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        self.requests.write().await.push(RecordedRequest {
            url: url.to_string(),
            bearer_token: bearer_token.to_string(),
            body,
        });

        let reply = self.replies.read().await.get(&booking_id).cloned();
        match reply {
            Some(ScriptedReply::Respond(response)) => Ok(response),
            Some(ScriptedReply::Delayed(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(ScriptedReply::Gated(gate, response)) => {
                gate.notified().await;
                Ok(response)
            }
            Some(ScriptedReply::Fail(message)) => Err(StorefrontError::TransportError(message)),
            None => Ok(TransportResponse::new(
                404,
                r#"{"message":"Booking not found"}"#,
            )),
        }
    }
}
