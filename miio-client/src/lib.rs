//! Private miIO transport seam for gateway devices
//!
//! This crate defines the boundary between the gateway-radio crates and
//! whatever actually speaks the miIO wire protocol. It provides:
//! - [`MiioTransport`], the blocking `info` / `send` contract a device handle fulfils
//! - [`DeviceInfo`], the identity a device reports about itself
//! - [`Token`], a validated auth token that is safe to log
//! - [`MiioError`], the single transport-level error kind
//!
//! The wire format itself (encryption, handshake, UDP framing) lives in the
//! transport implementation and is not part of this crate.

mod error;
mod token;

pub use error::MiioError;
pub use token::{Token, TOKEN_LENGTH};

use serde::Deserialize;
use serde_json::Value;

/// Hardware and firmware identity reported by `miIO.info`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceInfo {
    /// Model identifier, e.g. `lumi.gateway.v3`
    pub model: String,
    #[serde(rename = "fw_ver", alias = "firmware_version")]
    pub firmware_version: String,
    #[serde(rename = "hw_ver", alias = "hardware_version")]
    pub hardware_version: String,
    #[serde(rename = "mac", alias = "mac_address")]
    pub mac_address: String,
}

impl DeviceInfo {
    /// Decode the JSON object returned by `miIO.info`
    pub fn from_value(value: Value) -> Result<Self, MiioError> {
        serde_json::from_value(value).map_err(|e| MiioError::Parse(e.to_string()))
    }
}

/// Blocking request/response access to a single miIO device
///
/// Both calls block the current thread until the device answers or the
/// transport gives up. Callers running on an async executor must hand them
/// to a blocking-capable worker rather than invoking them inline.
pub trait MiioTransport: Send + Sync + 'static {
    /// Query the device identity
    fn info(&self) -> Result<DeviceInfo, MiioError>;

    /// Send a raw method call and return the decoded `result` payload
    ///
    /// Control methods usually answer with an array such as `["ok"]`;
    /// property getters answer with an object.
    fn send(&self, method: &str, params: &[Value]) -> Result<Value, MiioError>;
}
