//! `volume_ctrl_fm` operation

use serde_json::Value;

use crate::ack::Ack;
use crate::operation::{MiioOperation, ValidationError};
use crate::ApiError;

/// `volume_ctrl_fm` operation
pub struct VolumeCtrlFmOperation;

/// Request for `volume_ctrl_fm`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeCtrlFmRequest {
    /// Volume level in `0.0..=1.0`
    pub level: f64,
}

impl VolumeCtrlFmRequest {
    pub fn new(level: f64) -> Self {
        Self { level }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level.is_nan() {
            return Err(ValidationError::invalid_value("level", self.level, "not a number"));
        }
        if !(0.0..=1.0).contains(&self.level) {
            return Err(ValidationError::range_error("level", 0.0, 1.0, self.level));
        }
        Ok(())
    }
}

/// Render a `0.0..=1.0` level as the percentage string the firmware expects
///
/// Whole numbers keep a trailing `.0` (`0.5` becomes `"50.0"`).
pub fn format_percent(level: f64) -> String {
    format!("{:?}", level * 100.0)
}

impl MiioOperation for VolumeCtrlFmOperation {
    type Request = VolumeCtrlFmRequest;
    type Response = Ack;

    const METHOD: &'static str = "volume_ctrl_fm";

    fn build_params(request: &Self::Request) -> Result<Vec<Value>, ValidationError> {
        request.validate()?;
        Ok(vec![Value::from(format_percent(request.level))])
    }

    fn parse_response(value: Value) -> Result<Self::Response, ApiError> {
        Ok(Ack::new(value))
    }
}
