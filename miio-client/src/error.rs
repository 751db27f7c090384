//! Error types for the miIO transport

use thiserror::Error;

/// Errors that can occur while talking to a miIO device
///
/// Every variant is a transport-level failure: callers above this crate
/// treat them uniformly as "the device could not be reached or refused".
#[derive(Debug, Error)]
pub enum MiioError {
    /// Network or socket communication error
    #[error("Network error: {0}")]
    Network(String),

    /// The device did not answer in time
    #[error("Request timed out")]
    Timeout,

    /// Error object returned by the device itself
    #[error("Device error {code}: {message}")]
    Device { code: i64, message: String },

    /// The device answered with something that could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// The auth token is not usable
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
