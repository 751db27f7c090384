//! Acknowledgements for control methods

use serde_json::Value;

/// Literal the device puts first in a successful control response
pub const SUCCESS_MARKER: &str = "ok";

/// Raw answer to a control method such as `play_fm`
///
/// Control methods answer with an array; the call succeeded only if the
/// first element is the string `"ok"`. Anything else, including an empty
/// array or a non-array payload, counts as not acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    raw: Value,
}

impl Ack {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Whether the device acknowledged the command
    pub fn is_ok(&self) -> bool {
        is_success(&self.raw)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Check a raw response for the success marker
pub fn is_success(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .map(|first| first == SUCCESS_MARKER)
        .unwrap_or(false)
}
