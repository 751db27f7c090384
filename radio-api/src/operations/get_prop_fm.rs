//! `get_prop_fm` operation

use serde_json::{Map, Value};

use crate::operation::{MiioOperation, ValidationError};
use crate::ApiError;

/// `get_prop_fm` operation
pub struct GetPropFmOperation;

/// Decoded answer to `get_prop_fm`
///
/// The typed fields are views over `raw`, which keeps every key the device
/// reported so callers can surface them as attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct FmProperties {
    /// Status string such as `run` or `pause`, if reported as a string
    pub current_status: Option<String>,
    /// Volume as a raw percentage; 0 when the device omits it
    pub current_volume: f64,
    /// Current program label or id
    pub current_program: Option<Value>,
    /// Every key/value pair from the response
    pub raw: Map<String, Value>,
}

impl FmProperties {
    /// Build the typed view from a response object
    pub fn from_map(raw: Map<String, Value>) -> Result<Self, ApiError> {
        let current_status = raw
            .get("current_status")
            .and_then(Value::as_str)
            .map(str::to_string);

        let current_volume = match raw.get("current_volume") {
            None | Some(Value::Null) => 0.0,
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                ApiError::ParseError(format!("current_volume {} is not representable", n))
            })?,
            Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
                ApiError::ParseError(format!("current_volume '{}' is not numeric", s))
            })?,
            Some(other) => {
                return Err(ApiError::ParseError(format!(
                    "current_volume has unexpected type: {}",
                    other
                )))
            }
        };

        let current_program = raw.get("current_program").cloned();

        Ok(Self {
            current_status,
            current_volume,
            current_program,
            raw,
        })
    }
}

impl MiioOperation for GetPropFmOperation {
    type Request = ();
    type Response = FmProperties;

    const METHOD: &'static str = "get_prop_fm";

    fn build_params(_request: &Self::Request) -> Result<Vec<Value>, ValidationError> {
        Ok(Vec::new())
    }

    fn parse_response(value: Value) -> Result<Self::Response, ApiError> {
        match value {
            Value::Object(map) => FmProperties::from_map(map),
            other => Err(ApiError::ParseError(format!(
                "get_prop_fm returned a non-object payload: {}",
                other
            ))),
        }
    }
}
