//! `play_fm` operation

use serde_json::Value;

use crate::ack::Ack;
use crate::operation::{MiioOperation, ValidationError};
use crate::ApiError;

/// Argument accepted by `play_fm`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmAction {
    On,
    Off,
    Next,
    Prev,
}

impl FmAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FmAction::On => "on",
            FmAction::Off => "off",
            FmAction::Next => "next",
            FmAction::Prev => "prev",
        }
    }
}

/// `play_fm` operation
pub struct PlayFmOperation;

/// Request for `play_fm`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayFmRequest {
    pub action: FmAction,
}

impl MiioOperation for PlayFmOperation {
    type Request = PlayFmRequest;
    type Response = Ack;

    const METHOD: &'static str = "play_fm";

    fn build_params(request: &Self::Request) -> Result<Vec<Value>, ValidationError> {
        Ok(vec![Value::from(request.action.as_str())])
    }

    fn parse_response(value: Value) -> Result<Self::Response, ApiError> {
        Ok(Ack::new(value))
    }
}
