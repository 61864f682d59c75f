//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the client.
//! It centralizes error management, providing a consistent way to classify every
//! failure a flow can run into: a missing or expired session, a client-side
//! validation failure, an error response from the API, or a transport problem.
//!
//! `From` trait implementations for `reqwest::Error` and
//! `validator::ValidationErrors` allow easy conversion using the `?` operator.
//! Errors are never retried automatically; every failure is surfaced to the user,
//! either inline next to the originating field or as a blocking alert.

use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the client.
#[derive(Debug)]
pub enum AppError {
    /// No stored token, or the API answered 401. The session has already been
    /// cleared by the time this error is seen; flows return to the login screen.
    Auth(String),
    /// A client-side field check failed. No network call was made.
    Validation(String),
    /// The API answered with a non-2xx status. The message is extracted from the
    /// response body and shown to the user verbatim.
    Api { status: u16, message: String },
    /// A transport-level failure (DNS, connection, broken body). Surfaced as a
    /// generic message since there is nothing actionable in it for the user.
    Network(String),
    /// An unexpected client-side failure, such as an unwritable session file or
    /// a response body that does not match the expected shape.
    Internal(String),
}

impl AppError {
    /// True for errors that must send the user back to the login screen.
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Auth(msg) => write!(f, "Not authenticated: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// The detailed per-field messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `reqwest::Error` into `AppError::Network`.
///
/// Covers DNS, connection and body-read failures. Status-code errors never take
/// this path; the client inspects statuses itself before reading the body.
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> AppError {
        AppError::Network(error.to_string())
    }
}
