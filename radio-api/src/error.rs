use miio_client::MiioError;
use thiserror::Error;

use crate::operation::ValidationError;

/// High-level API errors for gateway radio operations
///
/// This enum abstracts away the transport details and gives callers a
/// domain view of what went wrong when driving the radio.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// The device was unreachable or the connection broke mid-request.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The device did not answer in time
    #[error("Request timed out")]
    Timeout,

    /// Error object returned by the device
    ///
    /// The request reached the device but was rejected, e.g. an unknown
    /// method or a parameter the firmware does not accept.
    #[error("Device error {code}: {message}")]
    DeviceError { code: i64, message: String },

    /// Response parsing error
    ///
    /// The device answered, but the payload did not have the expected shape.
    /// Also covers malformed property descriptors.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid parameter value
    ///
    /// Returned when a request cannot be built, e.g. a volume level outside
    /// `0.0..=1.0`.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Whether this error originated in the transport rather than locally
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::InvalidParameter(_))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Convert from MiioError to ApiError
impl From<MiioError> for ApiError {
    fn from(error: MiioError) -> Self {
        match error {
            MiioError::Network(msg) => ApiError::NetworkError(msg),
            MiioError::Timeout => ApiError::Timeout,
            MiioError::Device { code, message } => ApiError::DeviceError { code, message },
            MiioError::Parse(msg) => ApiError::ParseError(msg),
            MiioError::InvalidToken(msg) => ApiError::NetworkError(format!("invalid token: {}", msg)),
        }
    }
}

/// Convert from ValidationError to ApiError
impl From<ValidationError> for ApiError {
    fn from(validation_error: ValidationError) -> Self {
        match validation_error {
            ValidationError::RangeError { parameter, value, min, max } => {
                ApiError::InvalidParameter(format!(
                    "Parameter '{}' value {} is out of range [{}, {}]",
                    parameter, value, min, max
                ))
            }
            ValidationError::InvalidValue { parameter, value, reason } => {
                ApiError::InvalidParameter(format!(
                    "Invalid value '{}' for parameter '{}': {}",
                    value, parameter, reason
                ))
            }
        }
    }
}
