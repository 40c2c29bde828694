use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const CHECKOUT_SESSION_PATH: &str = "/api/payments/create-checkout-session";

/// Settings for reaching the payment-session endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub base_url: String,
    /// `None` waits for the response indefinitely.
    pub request_timeout: Option<Duration>,
}

impl CheckoutConfig {
    /// Creates a config for the backend at `base_url`, with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    /// Bounds each checkout-session request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn checkout_session_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHECKOUT_SESSION_PATH
        )
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
