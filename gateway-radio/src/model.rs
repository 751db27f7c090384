//! Entity state types exposed to the host

use bitflags::bitflags;
use miio_client::{DeviceInfo, Token};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::RadioConfig;

/// Playback status of the radio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Playing,
    #[default]
    Paused,
    /// The device reported a status we do not recognize
    Unknown,
}

impl PlayerState {
    /// Map the `current_status` field reported by `get_prop_fm`
    ///
    /// `run` means playing and `pause` means paused; anything else,
    /// including a missing field, is unknown.
    pub fn from_fm_status(status: Option<&str>) -> Self {
        match status {
            Some("run") => PlayerState::Playing,
            Some("pause") => PlayerState::Paused,
            _ => PlayerState::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerState::Playing => "playing",
            PlayerState::Paused => "paused",
            PlayerState::Unknown => "unknown",
        }
    }
}

/// Media player device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Speaker,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Speaker => "speaker",
        }
    }
}

bitflags! {
    /// Media player capabilities, using the host's numeric values
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SupportedFeatures: u32 {
        const PAUSE = 1;
        const VOLUME_SET = 4;
        const PREVIOUS_TRACK = 16;
        const NEXT_TRACK = 32;
        const PLAY = 16384;
    }
}

impl SupportedFeatures {
    /// Everything the gateway radio can do
    pub fn radio() -> Self {
        Self::PLAY | Self::PAUSE | Self::VOLUME_SET | Self::PREVIOUS_TRACK | Self::NEXT_TRACK
    }
}

/// Immutable identity of the device behind an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub model: String,
    /// `<model>-<mac>`
    pub unique_id: String,
    pub name: String,
    pub host: String,
    pub token: Token,
}

impl DeviceIdentity {
    pub fn new(config: &RadioConfig, info: &DeviceInfo) -> Self {
        Self {
            model: info.model.clone(),
            unique_id: format!("{}-{}", info.model, info.mac_address),
            name: config.name.clone(),
            host: config.host.clone(),
            token: config.token.clone(),
        }
    }
}

/// Everything the host publishes for the entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadioSnapshot {
    pub unique_id: String,
    pub name: String,
    pub available: bool,
    pub state: Option<String>,
    pub attributes: Map<String, Value>,
    pub device_class: DeviceClass,
    pub supported_features: u32,
    pub volume_level: Option<f64>,
    pub media_title: Option<String>,
}
