//! Host-facing entity contracts
//!
//! [`Entity`] is what every polled device exposes to the host's registry;
//! [`MediaPlayer`] adds the playback capability on top.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::model::{DeviceClass, SupportedFeatures};

/// A polled entity registered with the host
#[async_trait]
pub trait Entity: Send {
    fn unique_id(&self) -> &str;

    fn name(&self) -> &str;

    /// Whether the last poll reached the device
    fn available(&self) -> bool;

    /// Generic state string, if the entity has one
    fn state(&self) -> Option<&str>;

    /// Extra attributes published alongside the state
    fn state_attributes(&self) -> &Map<String, Value>;

    /// The host must poll this entity for updates
    fn should_poll(&self) -> bool {
        true
    }

    /// Fetch fresh state from the device
    ///
    /// Never fails: problems are logged and reflected in [`Entity::available`].
    async fn refresh(&mut self) {}
}

/// Playback control for a media player entity
///
/// Each command returns whether the device acknowledged it.
#[async_trait]
pub trait MediaPlayer: Entity {
    fn supported_features(&self) -> SupportedFeatures;

    fn device_class(&self) -> DeviceClass;

    /// Volume in `0.0..=1.0`, once known
    fn volume_level(&self) -> Option<f64>;

    fn media_title(&self) -> Option<String>;

    async fn play(&mut self) -> bool;

    async fn pause(&mut self) -> bool;

    async fn next_track(&mut self) -> bool;

    async fn previous_track(&mut self) -> bool;

    /// Set the volume, `level` in `0.0..=1.0`
    async fn set_volume(&mut self, level: f64) -> bool;
}
