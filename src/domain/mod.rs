//! Domain layer: listing and checkout value types plus the ports the
//! application layer talks to.

pub mod checkout;
pub mod listing;
pub mod ports;
