//! Operation framework for miIO method calls
//!
//! Each radio command is a zero-sized type implementing [`MiioOperation`]:
//! it knows its method name, how to turn a typed request into positional
//! params, and how to decode the device's answer.

use serde_json::Value;

use crate::error::ApiError;

/// Base trait for all gateway radio operations
///
/// This trait defines the common interface that all miIO method calls
/// implement. It provides type safety through associated types and keeps
/// request construction separate from the (blocking) transport call, so a
/// request that cannot be built never reaches the device.
pub trait MiioOperation {
    /// The request type for this operation
    type Request;

    /// The decoded response type for this operation
    type Response;

    /// The miIO method name, e.g. `play_fm`
    const METHOD: &'static str;

    /// Build the positional params for the method call
    ///
    /// # Arguments
    /// * `request` - The typed request data
    ///
    /// # Returns
    /// The ordered params array, or a validation error if the request is unusable
    fn build_params(request: &Self::Request) -> Result<Vec<Value>, ValidationError>;

    /// Decode the `result` payload returned by the device
    ///
    /// # Arguments
    /// * `value` - The raw JSON result
    ///
    /// # Returns
    /// The typed response data or an error if the payload has the wrong shape
    fn parse_response(value: Value) -> Result<Self::Response, ApiError>;

    /// Get human-readable operation metadata
    fn metadata() -> OperationMetadata {
        OperationMetadata {
            method: Self::METHOD,
        }
    }
}

/// Metadata about a miIO operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMetadata {
    /// The method name (e.g., "get_prop_fm")
    pub method: &'static str,
}

/// Validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' value '{value}' is out of range ({min}..={max})")]
    RangeError {
        parameter: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Parameter '{parameter}' value '{value}' is invalid: {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    pub fn range_error(
        parameter: &str,
        min: impl std::fmt::Display,
        max: impl std::fmt::Display,
        value: impl std::fmt::Display,
    ) -> Self {
        Self::RangeError {
            parameter: parameter.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn invalid_value(parameter: &str, value: impl std::fmt::Display, reason: &str) -> Self {
        Self::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
