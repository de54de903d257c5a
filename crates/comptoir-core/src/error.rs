//! Error types for the comptoir client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, storage, authentication, and input validation failures, plus
//! the stand-alone [`LoginError`] used by the never-failing login flow.

use thiserror::Error;

/// The unified error type for comptoir operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, body decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Token store read/write errors.
    #[error("token store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication errors (rejected token refresh).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input validation errors (invalid base URL, unserializable body).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Response body could not be decoded.
    #[error("failed to decode response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Token store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O failed: {message}")]
    Io { message: String },

    /// The stored data could not be parsed.
    #[error("stored tokens are corrupt: {message}")]
    Corrupt { message: String },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            message: err.to_string(),
        }
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The refresh endpoint rejected the refresh token.
    ///
    /// The refresh procedure swallows this error after clearing the stored
    /// tokens, so it surfaces in logs rather than in return values.
    #[error("token refresh rejected: HTTP {status}")]
    RefreshRejected { status: u16 },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid dashboard base URL.
    #[error("invalid dashboard URL '{value}': {reason}")]
    Url { value: String, reason: String },

    /// A request body could not be serialized to JSON.
    #[error("invalid request body: {reason}")]
    Body { reason: String },

    /// A stored token contains bytes not allowed in an HTTP header.
    #[error("invalid token: {reason}")]
    Token { reason: String },
}

/// Outcome of a failed login attempt.
///
/// Login never surfaces the crate-level [`Error`]: every failure is folded
/// into one of these two cases, and the `Display` strings are the exact
/// messages the dashboard shows its users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginError {
    /// The token endpoint rejected the credentials.
    #[error("Identifiants incorrects")]
    InvalidCredentials,

    /// The token endpoint could not be reached or answered garbage.
    #[error("Erreur de connexion")]
    Connection,
}
