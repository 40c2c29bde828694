//! CSV adapters for listing records.

pub mod listing_reader;
pub mod listing_writer;
