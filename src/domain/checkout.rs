use crate::error::{Result, StorefrontError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a booking awaiting payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingReference(String);

impl BookingReference {
    pub fn new(booking_id: impl Into<String>) -> Result<Self> {
        let booking_id = booking_id.into();
        if booking_id.trim().is_empty() {
            Err(StorefrontError::ValidationError(
                "Booking id must not be empty".to_string(),
            ))
        } else {
            Ok(Self(booking_id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for BookingReference {
    type Error = StorefrontError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State of one checkout-session acquisition, as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutSessionState {
    /// No request issued.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Session token obtained.
    Ready { client_secret: String },
    /// Request failed or was rejected.
    Failed { message: String },
}

impl CheckoutSessionState {
    /// `Ready` or `Failed`.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready { .. } | Self::Failed { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn client_secret(&self) -> Option<&str> {
        match self {
            Self::Ready { client_secret } => Some(client_secret),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Message used when an error carries no description of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Unable to start checkout. Please try again.";

impl From<Result<String>> for CheckoutSessionState {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(client_secret) => Self::Ready { client_secret },
            Err(err) => {
                let message = err.to_string();
                Self::Failed {
                    message: if message.trim().is_empty() {
                        GENERIC_FAILURE_MESSAGE.to_string()
                    } else {
                        message
                    },
                }
            }
        }
    }
}

/// Body of `POST /api/payments/create-checkout-session`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest<'a> {
    pub booking_id: &'a str,
}

type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Validates a raw payment-service response and extracts the client secret.
///
/// Non-2xx statuses, bodies that are not JSON objects, and a missing or empty
/// `clientSecret` are all failures.
pub fn parse_session_response(status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<JsonObject>(body)
            .ok()
            .and_then(|object| {
                object
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "request was rejected".to_string());
        return Err(StorefrontError::HttpStatus { status, message });
    }

    let object: JsonObject = serde_json::from_str(body)
        .map_err(|e| StorefrontError::MalformedResponse(e.to_string()))?;

    match object.get("clientSecret") {
        Some(serde_json::Value::String(secret)) if !secret.is_empty() => Ok(secret.clone()),
        Some(serde_json::Value::String(_)) => Err(StorefrontError::MalformedResponse(
            "clientSecret is empty".to_string(),
        )),
        Some(_) => Err(StorefrontError::MalformedResponse(
            "clientSecret is not a string".to_string(),
        )),
        None => Err(StorefrontError::MalformedResponse(
            "clientSecret is missing".to_string(),
        )),
    }
}
