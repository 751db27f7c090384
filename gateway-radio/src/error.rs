use thiserror::Error;

use crate::config::ConfigError;
use crate::dispatch::DispatchError;

#[derive(Error, Debug)]
pub enum RadioError {
    /// The device could not be reached during setup; the host should retry later
    #[error("Device at {host} is not ready: {reason}")]
    NotReady { host: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] radio_api::ApiError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

impl From<miio_client::MiioError> for RadioError {
    fn from(error: miio_client::MiioError) -> Self {
        RadioError::Api(error.into())
    }
}
