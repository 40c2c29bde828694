//! Application layer containing the storefront's core logic.
//!
//! `ListingFilterEngine` derives the visible hotel list from raw listings and a
//! `FilterSpec`. `CheckoutSessionController` acquires a payment-session secret for
//! a booking and publishes its progress through a `tokio::sync::watch` channel.

pub mod checkout;
pub mod filter;
