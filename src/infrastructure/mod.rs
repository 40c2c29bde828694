//! Adapters for the ports defined in [`crate::domain::ports`].

pub mod credentials;
pub mod http;
pub mod in_memory;
