//! # gateway-radio - Xiaomi gateway FM radio as a polled media player
//!
//! Exposes the FM radio built into a Xiaomi gateway as a media player
//! entity. High-level intents (play, pause, next, previous, set volume) are
//! translated into the gateway's vendor methods, and a periodic refresh
//! keeps the cached playback state current.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gateway_radio::{setup_platform, MediaPlayer, RadioConfig};
//! # fn connect(_: &str, _: &gateway_radio::Token) -> Arc<dyn gateway_radio::MiioTransport> { unimplemented!() }
//!
//! # async fn run() -> Result<(), gateway_radio::RadioError> {
//! let config = RadioConfig::from_json(
//!     r#"{"host": "192.168.1.20", "token": "0123456789abcdef0123456789abcdef"}"#,
//! )?;
//! let mut radio = setup_platform(config, connect).await?;
//!
//! if radio.play().await {
//!     println!("now {:?}", radio.player_state());
//! }
//! radio.set_volume(0.4).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! gateway-radio (entity, refresh cycle, settle delay)
//!     ↓
//! MiioGenericDevice (run_command: dispatch, ack check, error containment)
//!     ↓
//! radio-api (play_fm / volume_ctrl_fm / get_prop_fm)
//!     ↓
//! miio-client (blocking MiioTransport)
//! ```

pub mod config;
pub mod device;
pub mod dispatch;
pub mod entity;
pub mod logging;
pub mod model;
pub mod poller;
pub mod radio;
pub mod setup;

mod error;

pub use config::{ConfigError, RadioConfig, DEFAULT_NAME, DEFAULT_SCAN_INTERVAL, SETTLE_DELAY};
pub use device::MiioGenericDevice;
pub use dispatch::{BlockingDispatcher, DispatchError};
pub use entity::{Entity, MediaPlayer};
pub use error::RadioError;
pub use model::{DeviceClass, DeviceIdentity, PlayerState, RadioSnapshot, SupportedFeatures};
pub use poller::{PollingTask, SharedRadio};
pub use radio::GatewayRadio;
pub use setup::setup_platform;

pub use miio_client::{DeviceInfo, MiioError, MiioTransport, Token};
