//! Unified error types for the Flow client
//!
//! Every fallible operation in the crate returns [`FlowResult`]. Module-level
//! error enums (`CurveError`, `RlpError`) convert into [`FlowError`] so callers
//! only ever match on [`ErrorCode`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all Flow client operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl FlowError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAddress, msg)
    }

    pub fn invalid_transaction(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTransaction, msg)
    }

    pub fn signing_order(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SigningOrder, msg)
    }

    pub fn network_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, msg)
    }

    pub fn crypto_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CryptoError, msg)
    }

    pub fn signing_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SigningFailed, msg)
    }

    pub fn broadcast_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::BroadcastFailed, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Timeout, msg)
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Cancelled, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for FlowError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    InvalidInput,
    InvalidAddress,
    InvalidTransaction,
    InvalidPrivateKey,
    InvalidPublicKey,

    // Signature assembly discipline
    SigningOrder,

    // Network errors
    NetworkError,
    Timeout,
    BroadcastFailed,
    TransactionNotFound,
    Cancelled,

    // Crypto errors
    CryptoError,
    SigningFailed,

    // Parse errors
    ParseError,
    JsonError,
    HexError,

    // Internal
    Internal,
}

/// Result type alias for Flow client operations
pub type FlowResult<T> = Result<T, FlowError>;

// Conversions from common error types

impl From<serde_json::Error> for FlowError {
    fn from(e: serde_json::Error) -> Self {
        FlowError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for FlowError {
    fn from(e: hex::FromHexError) -> Self {
        FlowError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<base64::DecodeError> for FlowError {
    fn from(e: base64::DecodeError) -> Self {
        FlowError::new(ErrorCode::ParseError, format!("Base64 error: {}", e))
    }
}

impl From<url::ParseError> for FlowError {
    fn from(e: url::ParseError) -> Self {
        FlowError::new(ErrorCode::InvalidInput, format!("Invalid URL: {}", e))
    }
}

impl From<std::io::Error> for FlowError {
    fn from(e: std::io::Error) -> Self {
        FlowError::new(ErrorCode::Internal, e.to_string())
    }
}

impl From<reqwest::Error> for FlowError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FlowError::new(ErrorCode::Timeout, "Request timed out")
        } else if e.is_connect() {
            FlowError::new(ErrorCode::NetworkError, "Connection failed")
        } else {
            FlowError::new(ErrorCode::NetworkError, e.to_string())
        }
    }
}
