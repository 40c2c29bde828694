use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Credential error: {0}")]
    CredentialError(String),
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Payment service returned {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("Malformed checkout session response: {0}")]
    MalformedResponse(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
