use crate::config::CheckoutConfig;
use crate::domain::checkout::{
    BookingReference, CheckoutSessionState, CreateCheckoutSessionRequest, parse_session_response,
};
use crate::domain::ports::{
    CheckoutTransport, CheckoutTransportRef, CredentialProvider, CredentialProviderRef,
};
use crate::error::{Result, StorefrontError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Requests a checkout session for `booking` and folds the outcome into a state.
///
/// Suspends twice: once for the bearer token, once for the HTTP response. Every
/// failure (credential, transport, status, body, timeout) ends in
/// [`CheckoutSessionState::Failed`]; nothing is propagated to the caller.
pub async fn fetch_session(
    config: &CheckoutConfig,
    booking: &BookingReference,
    credentials: &dyn CredentialProvider,
    transport: &dyn CheckoutTransport,
) -> CheckoutSessionState {
    let attempt = request_client_secret(config, booking, credentials, transport);
    let result = match config.request_timeout {
        Some(timeout) => tokio::time::timeout(timeout, attempt)
            .await
            .unwrap_or_else(|_| Err(StorefrontError::Timeout(timeout))),
        None => attempt.await,
    };
    result.into()
}

async fn request_client_secret(
    config: &CheckoutConfig,
    booking: &BookingReference,
    credentials: &dyn CredentialProvider,
    transport: &dyn CheckoutTransport,
) -> Result<String> {
    let token = credentials.bearer_token().await?;
    if token.is_empty() {
        return Err(StorefrontError::CredentialError(
            "no bearer token available".to_string(),
        ));
    }

    let body = serde_json::to_value(CreateCheckoutSessionRequest {
        booking_id: booking.as_str(),
    })?;
    let response = transport
        .post_json(&config.checkout_session_url(), &token, body)
        .await?;
    parse_session_response(response.status, &response.body)
}

/// State shared between the controller and its in-flight task.
///
/// `activation` is only read or bumped inside the watch channel's modify closures,
/// so comparing it and writing the state happen under the same lock.
struct SessionCell {
    state: watch::Sender<CheckoutSessionState>,
    activation: AtomicU64,
}

impl SessionCell {
    fn new() -> Self {
        let (state, _) = watch::channel(CheckoutSessionState::Idle);
        Self {
            state,
            activation: AtomicU64::new(0),
        }
    }

    /// Starts a new activation with `state`, superseding any previous one.
    fn begin(&self, state: CheckoutSessionState) -> u64 {
        let mut token = 0;
        self.state.send_modify(|current| {
            token = self.activation.fetch_add(1, Ordering::SeqCst) + 1;
            *current = state;
        });
        token
    }

    /// Applies `outcome` only if `token` is still the latest activation and it is loading.
    fn settle(&self, token: u64, outcome: CheckoutSessionState) -> bool {
        self.state.send_if_modified(|current| {
            if self.activation.load(Ordering::SeqCst) != token || !current.is_loading() {
                return false;
            }
            *current = outcome;
            true
        })
    }
}

#[derive(Default)]
struct Activation {
    booking: Option<BookingReference>,
    task: Option<JoinHandle<()>>,
}

/// Drives the acquisition of a checkout session for the booking on screen.
///
/// The controller publishes a single [`CheckoutSessionState`] through a watch channel.
/// Each call to [`activate`](Self::activate) or [`retry`](Self::retry) starts a new
/// activation; results from superseded activations are dropped without touching the
/// published state.
///
/// Activation spawns onto the current tokio runtime. Dropping the controller
/// deactivates it.
pub struct CheckoutSessionController {
    config: CheckoutConfig,
    credentials: CredentialProviderRef,
    transport: CheckoutTransportRef,
    cell: Arc<SessionCell>,
    current: Mutex<Activation>,
}

impl CheckoutSessionController {
    /// Creates an idle controller. Nothing is fetched until [`activate`](Self::activate).
    pub fn new(
        config: CheckoutConfig,
        credentials: CredentialProviderRef,
        transport: CheckoutTransportRef,
    ) -> Self {
        Self {
            config,
            credentials,
            transport,
            cell: Arc::new(SessionCell::new()),
            current: Mutex::new(Activation::default()),
        }
    }

    /// Shows `booking`, starting a fetch for it.
    ///
    /// Re-activating the booking already shown is a no-op while its fetch is loading
    /// or ready. Returns whether a new fetch was started.
    pub fn activate(&self, booking: BookingReference) -> bool {
        let mut current = self.lock_current();
        if current.booking.as_ref() == Some(&booking) {
            let state = self.cell.state.borrow();
            if state.is_loading() || state.client_secret().is_some() {
                return false;
            }
        }
        self.start(&mut current, booking);
        true
    }

    /// Restarts the fetch for the current booking after a failure.
    ///
    /// Does nothing unless the controller is in the `Failed` state.
    pub fn retry(&self) -> bool {
        let mut current = self.lock_current();
        let Some(booking) = current.booking.clone() else {
            return false;
        };
        if self.cell.state.borrow().failure_message().is_none() {
            return false;
        }
        self.start(&mut current, booking);
        true
    }

    /// Tears down the current activation and returns to `Idle`.
    ///
    /// Any in-flight request is aborted and its result, should it still arrive,
    /// is discarded.
    pub fn deactivate(&self) {
        let mut current = self.lock_current();
        if let Some(task) = current.task.take() {
            task.abort();
        }
        current.booking = None;
        self.cell.begin(CheckoutSessionState::Idle);
    }

    pub fn state(&self) -> CheckoutSessionState {
        self.cell.state.borrow().clone()
    }

    pub fn booking(&self) -> Option<BookingReference> {
        self.lock_current().booking.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CheckoutSessionState> {
        self.cell.state.subscribe()
    }

    /// Waits until the current activation leaves `Loading` and returns the new state.
    pub async fn settled(&self) -> CheckoutSessionState {
        let mut receiver = self.subscribe();
        match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    fn start(&self, current: &mut Activation, booking: BookingReference) {
        if let Some(previous) = current.task.take() {
            previous.abort();
        }

        let token = self.cell.begin(CheckoutSessionState::Loading);
        debug!(booking_id = %booking, activation = token, "requesting checkout session");

        let cell = Arc::clone(&self.cell);
        let config = self.config.clone();
        let credentials = Arc::clone(&self.credentials);
        let transport = Arc::clone(&self.transport);
        let task_booking = booking.clone();

        current.booking = Some(booking);
        current.task = Some(tokio::spawn(async move {
            let outcome = fetch_session(
                &config,
                &task_booking,
                credentials.as_ref(),
                transport.as_ref(),
            )
            .await;

            let failure = outcome.failure_message().map(str::to_owned);
            if !cell.settle(token, outcome) {
                debug!(booking_id = %task_booking, activation = token, "discarding stale checkout session result");
            } else if let Some(message) = failure {
                warn!(booking_id = %task_booking, %message, "checkout session failed");
            } else {
                info!(booking_id = %task_booking, "checkout session ready");
            }
        }));
    }

    fn lock_current(&self) -> MutexGuard<'_, Activation> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CheckoutSessionController {
    fn drop(&mut self) {
        let current = self
            .current
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = current.task.take() {
            task.abort();
        }
        current.booking = None;
        self.cell.begin(CheckoutSessionState::Idle);
    }
}
