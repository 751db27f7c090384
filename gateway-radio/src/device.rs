//! Generic miIO device adapter
//!
//! Holds the identity of one device and provides the uniform "run a
//! command, report whether it was acknowledged" primitive that concrete
//! entities build on. Transport failures never escape this layer from the
//! command path: they are logged and turned into `false`.

use std::sync::Arc;

use async_trait::async_trait;
use miio_client::{MiioError, MiioTransport};
use radio_api::{ack, ApiError, MiioOperation, PropertySet, ValidationError};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::dispatch::BlockingDispatcher;
use crate::entity::Entity;
use crate::model::DeviceIdentity;
use crate::RadioError;

/// Getter used when no other property getter is configured
pub const DEFAULT_PROPERTIES_GETTER: &str = "get_prop_fm";

/// A single miIO device as seen by the host
pub struct MiioGenericDevice {
    transport: Arc<dyn MiioTransport>,
    dispatcher: BlockingDispatcher,
    identity: DeviceIdentity,
    available: bool,
    state_attrs: Map<String, Value>,
    properties_getter: String,
    properties: PropertySet,
}

impl MiioGenericDevice {
    pub fn new(
        transport: Arc<dyn MiioTransport>,
        dispatcher: BlockingDispatcher,
        identity: DeviceIdentity,
    ) -> Self {
        Self {
            transport,
            dispatcher,
            identity,
            available: true,
            state_attrs: Map::new(),
            properties_getter: DEFAULT_PROPERTIES_GETTER.to_string(),
            properties: PropertySet::default(),
        }
    }

    /// Use a different getter method for [`MiioGenericDevice::set_properties`]
    pub fn with_properties_getter(mut self, getter: impl Into<String>) -> Self {
        self.properties_getter = getter.into();
        self
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn properties_getter(&self) -> &str {
        &self.properties_getter
    }

    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// Replace the set of polled properties and return their labels
    ///
    /// With the scoped `get_properties` getter each entry must be a JSON
    /// property descriptor; otherwise entries are plain names.
    pub fn set_properties<S: AsRef<str>>(&mut self, properties: &[S]) -> Result<Vec<String>, ApiError> {
        self.properties = PropertySet::parse(&self.properties_getter, properties)?;
        Ok(self.properties.names())
    }

    /// Run a blocking device call and report whether it was acknowledged
    ///
    /// `func` runs on the blocking pool. The result counts as success only if
    /// it is an array starting with `"ok"`. A transport error is logged after
    /// `mask_error` and reported as `false`.
    pub async fn run_command<F>(&self, mask_error: &str, func: F) -> bool
    where
        F: FnOnce(&dyn MiioTransport) -> Result<Value, MiioError> + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        match self.dispatcher.run(move || func(transport.as_ref())).await {
            Ok(Ok(result)) => {
                info!("Response received from miio device: {}", result);
                ack::is_success(&result)
            }
            Ok(Err(err)) => {
                error!("{} {}", mask_error, err);
                false
            }
            Err(err) => {
                error!("{} {}", mask_error, err);
                false
            }
        }
    }

    /// Send `method` with `params` through [`MiioGenericDevice::run_command`]
    pub async fn send_command(&self, mask_error: &str, method: &str, params: Vec<Value>) -> bool {
        let method = method.to_string();
        self.run_command(mask_error, move |transport| transport.send(&method, &params))
            .await
    }

    /// Send an arbitrary vendor method
    pub async fn send_raw_command(&self, method: &str, params: Vec<Value>) -> bool {
        let outgoing = Value::Array(params.clone());
        info!("Sending command: {} {}", method, outgoing);
        self.send_command(
            &format!("Sending {} to the miio device failed.", method),
            method,
            params,
        )
        .await
    }

    /// Build and send a typed control operation
    ///
    /// Returns `Err` without contacting the device when the request cannot be
    /// turned into params; otherwise whether the device acknowledged it.
    pub async fn try_operation<Op>(
        &self,
        mask_error: &str,
        request: &Op::Request,
    ) -> Result<bool, ValidationError>
    where
        Op: MiioOperation,
    {
        let params = Op::build_params(request)?;
        Ok(self.send_command(mask_error, Op::METHOD, params).await)
    }

    /// Run a typed operation and decode its response
    pub async fn execute<Op>(&self, request: &Op::Request) -> Result<Op::Response, RadioError>
    where
        Op: MiioOperation + 'static,
    {
        let params = Op::build_params(request).map_err(ApiError::from)?;
        let method = Op::METHOD;
        let transport = Arc::clone(&self.transport);
        let raw = self
            .dispatcher
            .run(move || transport.send(method, &params))
            .await??;
        Ok(Op::parse_response(raw)?)
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Merge polled fields into the attributes, keeping keys not in `fields`
    pub(crate) fn merge_attributes(&mut self, fields: Map<String, Value>) {
        self.state_attrs.extend(fields);
    }
}

#[async_trait]
impl Entity for MiioGenericDevice {
    fn unique_id(&self) -> &str {
        &self.identity.unique_id
    }

    fn name(&self) -> &str {
        &self.identity.name
    }

    fn available(&self) -> bool {
        self.available
    }

    fn state(&self) -> Option<&str> {
        None
    }

    fn state_attributes(&self) -> &Map<String, Value> {
        &self.state_attrs
    }
}
