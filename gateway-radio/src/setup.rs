//! Platform setup
//!
//! Connects to the configured gateway, reads its identity and hands back a
//! ready entity. The returned [`GatewayRadio`] is the only handle to the
//! device; the host keeps it in its own entity registry.

use std::sync::Arc;

use miio_client::{MiioTransport, Token};
use tracing::info;

use crate::config::RadioConfig;
use crate::device::MiioGenericDevice;
use crate::dispatch::BlockingDispatcher;
use crate::entity::Entity;
use crate::model::DeviceIdentity;
use crate::radio::GatewayRadio;
use crate::RadioError;

/// Set up a gateway radio entity from its configuration
///
/// `connect` builds the transport for `host` and `token`. The device is
/// queried for its identity and polled once before the entity is returned.
///
/// # Errors
///
/// - [`RadioError::Config`] if the configuration is invalid
/// - [`RadioError::NotReady`] if the device cannot be reached; the host
///   should retry setup later
pub async fn setup_platform<C>(config: RadioConfig, connect: C) -> Result<GatewayRadio, RadioError>
where
    C: FnOnce(&str, &Token) -> Arc<dyn MiioTransport>,
{
    config.validate()?;

    info!(
        "Initializing {} with host {} (token {})",
        config.name,
        config.host,
        config.token.redacted()
    );

    let transport = connect(&config.host, &config.token);
    let dispatcher = BlockingDispatcher::new(config.max_blocking_calls);

    let info_transport = Arc::clone(&transport);
    let not_ready = |reason: String| RadioError::NotReady {
        host: config.host.clone(),
        reason,
    };
    let device_info = dispatcher
        .run(move || info_transport.info())
        .await
        .map_err(|e| not_ready(e.to_string()))?
        .map_err(|e| not_ready(e.to_string()))?;

    info!(
        "{} {} {} detected",
        device_info.model, device_info.firmware_version, device_info.hardware_version
    );

    let identity = DeviceIdentity::new(&config, &device_info);
    let device = MiioGenericDevice::new(transport, dispatcher, identity);
    let mut radio = GatewayRadio::new(device);

    radio.refresh().await;
    radio.publish_state();

    Ok(radio)
}
