//! Gateway FM radio entity
//!
//! Wraps a [`MiioGenericDevice`] with the radio's command vocabulary and
//! the cached playback state the host reads between polls.
//!
//! Commands the device reflects with latency (play and track changes) arm a
//! settle delay: the next refresh waits it out before polling, so a stale
//! "paused" status is not read back right after starting playback.

use std::time::Duration;

use async_trait::async_trait;
use radio_api::operations::{
    FmAction, FmProperties, GetPropFmOperation, PlayFmOperation, PlayFmRequest,
    VolumeCtrlFmOperation, VolumeCtrlFmRequest,
};
use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::config::SETTLE_DELAY;
use crate::device::MiioGenericDevice;
use crate::entity::{Entity, MediaPlayer};
use crate::model::{DeviceClass, PlayerState, RadioSnapshot, SupportedFeatures};

/// The gateway's FM radio as a media player entity
pub struct GatewayRadio {
    device: MiioGenericDevice,
    player_state: PlayerState,
    volume_level: Option<f64>,
    device_class: DeviceClass,
    settle_delay: Duration,
    publisher: watch::Sender<RadioSnapshot>,
}

impl GatewayRadio {
    pub fn new(device: MiioGenericDevice) -> Self {
        let player_state = PlayerState::default();
        let device_class = DeviceClass::Speaker;
        let (publisher, _) =
            watch::channel(snapshot_of(&device, player_state, None, device_class));

        Self {
            device,
            player_state,
            volume_level: None,
            device_class,
            settle_delay: Duration::ZERO,
            publisher,
        }
    }

    /// The underlying generic device
    pub fn device(&self) -> &MiioGenericDevice {
        &self.device
    }

    pub fn player_state(&self) -> PlayerState {
        self.player_state
    }

    /// Delay the next refresh will wait before polling
    pub fn pending_settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Receive every state the entity publishes
    pub fn subscribe(&self) -> watch::Receiver<RadioSnapshot> {
        self.publisher.subscribe()
    }

    /// Current state as the host would publish it
    pub fn snapshot(&self) -> RadioSnapshot {
        snapshot_of(
            &self.device,
            self.player_state,
            self.volume_level,
            self.device_class,
        )
    }

    /// Push the current state to subscribers
    pub fn publish_state(&self) {
        self.publisher.send_replace(self.snapshot());
    }

    /// Send an arbitrary vendor method to the gateway
    pub async fn send_raw_command(&self, method: &str, params: Vec<Value>) -> bool {
        self.device.send_raw_command(method, params).await
    }

    fn mask_error(&self) -> String {
        format!("Setting property for {} failed.", self.device.name())
    }

    async fn play_fm(&self, action: FmAction) -> bool {
        let mask = self.mask_error();
        match self
            .device
            .try_operation::<PlayFmOperation>(&mask, &PlayFmRequest { action })
            .await
        {
            Ok(acknowledged) => acknowledged,
            Err(e) => {
                error!("{} {}", mask, e);
                false
            }
        }
    }

    fn apply_properties(&mut self, props: FmProperties) {
        self.player_state = PlayerState::from_fm_status(props.current_status.as_deref());
        self.volume_level = Some(props.current_volume / 100.0);
        self.device.merge_attributes(props.raw);
    }
}

fn snapshot_of(
    device: &MiioGenericDevice,
    player_state: PlayerState,
    volume_level: Option<f64>,
    device_class: DeviceClass,
) -> RadioSnapshot {
    RadioSnapshot {
        unique_id: device.unique_id().to_string(),
        name: device.name().to_string(),
        available: device.available(),
        state: Some(player_state.as_str().to_string()),
        attributes: device.state_attributes().clone(),
        device_class,
        supported_features: SupportedFeatures::radio().bits(),
        volume_level,
        media_title: media_title_of(device.state_attributes()),
    }
}

/// `current_program` rendered as text
fn media_title_of(attributes: &Map<String, Value>) -> Option<String> {
    match attributes.get("current_program")? {
        Value::Null => None,
        Value::String(title) => Some(title.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl Entity for GatewayRadio {
    fn unique_id(&self) -> &str {
        self.device.unique_id()
    }

    fn name(&self) -> &str {
        self.device.name()
    }

    fn available(&self) -> bool {
        self.device.available()
    }

    fn state(&self) -> Option<&str> {
        Some(self.player_state.as_str())
    }

    fn state_attributes(&self) -> &Map<String, Value> {
        self.device.state_attributes()
    }

    async fn refresh(&mut self) {
        if !self.settle_delay.is_zero() {
            debug!("Waiting {:?} for {} to settle", self.settle_delay, self.name());
            tokio::time::sleep(self.settle_delay).await;
            self.settle_delay = Duration::ZERO;
        }

        match self.device.execute::<GetPropFmOperation>(&()).await {
            Ok(props) => {
                let polled = Value::Object(props.raw.clone());
                debug!("Got new state: {}", polled);
                self.device.set_available(true);
                self.apply_properties(props);
            }
            Err(e) => {
                self.device.set_available(false);
                error!("Got exception while fetching the state: {}", e);
            }
        }
    }
}

#[async_trait]
impl MediaPlayer for GatewayRadio {
    fn supported_features(&self) -> SupportedFeatures {
        SupportedFeatures::radio()
    }

    fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    fn volume_level(&self) -> Option<f64> {
        self.volume_level
    }

    fn media_title(&self) -> Option<String> {
        media_title_of(self.state_attributes())
    }

    async fn play(&mut self) -> bool {
        let acknowledged = self.play_fm(FmAction::On).await;
        if acknowledged {
            self.player_state = PlayerState::Playing;
            self.settle_delay = SETTLE_DELAY;
            self.publish_state();
        }
        acknowledged
    }

    async fn pause(&mut self) -> bool {
        let acknowledged = self.play_fm(FmAction::Off).await;
        if acknowledged {
            self.player_state = PlayerState::Paused;
            self.publish_state();
        }
        acknowledged
    }

    // next sends "prev" and previous sends "next", as the radio has always been driven
    async fn next_track(&mut self) -> bool {
        let acknowledged = self.play_fm(FmAction::Prev).await;
        if acknowledged {
            self.player_state = PlayerState::Playing;
            self.settle_delay = SETTLE_DELAY;
        }
        acknowledged
    }

    async fn previous_track(&mut self) -> bool {
        let acknowledged = self.play_fm(FmAction::Next).await;
        if acknowledged {
            self.player_state = PlayerState::Playing;
            self.settle_delay = SETTLE_DELAY;
        }
        acknowledged
    }

    async fn set_volume(&mut self, level: f64) -> bool {
        let mask = self.mask_error();
        match self
            .device
            .try_operation::<VolumeCtrlFmOperation>(&mask, &VolumeCtrlFmRequest::new(level))
            .await
        {
            Ok(acknowledged) => acknowledged,
            Err(e) => {
                // Nothing reached the device; the requested level is cached unvalidated
                warn!(
                    "Could not build volume command for {}: {}; caching requested level",
                    self.name(),
                    e
                );
                self.volume_level = Some(level);
                self.publish_state();
                false
            }
        }
    }
}
