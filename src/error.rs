//! Error types

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures talking to the order API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Order API returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from order API: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() { ApiError::Decode(err.to_string()) } else { ApiError::Network(err.to_string()) }
    }
}

/// Local validation that runs before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecheckReason {
    NotLoggedIn,
    EmptyCart,
}

impl fmt::Display for PrecheckReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLoggedIn => write!(f, "not logged in"),
            Self::EmptyCart => write!(f, "cart empty"),
        }
    }
}

/// Every variant leaves the cart exactly as it was before checkout.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Checkout precheck failed: {0}")]
    PrecheckFailed(PrecheckReason),

    #[error("Order rejected: {message}")]
    OrderRejected { status: u16, message: String },

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ApiError> for CheckoutError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status, message } => CheckoutError::OrderRejected { status, message },
            ApiError::Network(msg) | ApiError::Decode(msg) => CheckoutError::NetworkFailure(msg),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var} value: {value:?}")]
    Invalid { var: &'static str, value: String },
}
