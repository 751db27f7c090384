//! Recording mock transport for testing.
//!
//! `MockTransport` answers miIO calls from canned replies without touching
//! the network, records every call it receives, and can be switched into an
//! unreachable mode to exercise transport failure paths.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gateway_radio::{
    BlockingDispatcher, DeviceIdentity, DeviceInfo, GatewayRadio, MiioError, MiioGenericDevice,
    MiioTransport, RadioConfig, Token,
};
use serde_json::{json, Value};

pub const TOKEN: &str = "0123456789abcdef0123456789abcdef";
pub const HOST: &str = "192.168.1.20";

/// Canned answer for one method
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(Value),
    Fail,
}

#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    unreachable: AtomicBool,
    info_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer `method` with `value` from now on
    pub fn reply(&self, method: &str, value: Value) {
        self.replies
            .lock()
            .unwrap()
            .insert(method.to_string(), Reply::Ok(value));
    }

    /// Make `method` raise a device error from now on
    pub fn fail(&self, method: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(method.to_string(), Reply::Fail);
    }

    /// Make every call fail as if the host were down
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Params of every call to `method`, in order
    pub fn calls_to(&self, method: &str) -> Vec<Vec<Value>> {
        self.calls()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params)
            .collect()
    }

    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }
}

impl MiioTransport for MockTransport {
    fn info(&self) -> Result<DeviceInfo, MiioError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(MiioError::Network("No response from the device".to_string()));
        }
        Ok(sample_info())
    }

    fn send(&self, method: &str, params: &[Value]) -> Result<Value, MiioError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params.to_vec()));

        if self.unreachable.load(Ordering::SeqCst) {
            return Err(MiioError::Timeout);
        }

        match self.replies.lock().unwrap().get(method) {
            Some(Reply::Ok(value)) => Ok(value.clone()),
            Some(Reply::Fail) => Err(MiioError::Device {
                code: -5001,
                message: format!("{} rejected", method),
            }),
            None => Ok(json!(["ok"])),
        }
    }
}

pub fn sample_info() -> DeviceInfo {
    DeviceInfo {
        model: "lumi.gateway.v3".to_string(),
        firmware_version: "1.4.1_164".to_string(),
        hardware_version: "MW300".to_string(),
        mac_address: "34:CE:00:AA:BB:CC".to_string(),
    }
}

pub fn test_config() -> RadioConfig {
    RadioConfig::new(HOST, Token::parse(TOKEN).unwrap())
}

pub fn test_device(transport: Arc<MockTransport>) -> MiioGenericDevice {
    let identity = DeviceIdentity::new(&test_config(), &sample_info());
    MiioGenericDevice::new(transport, BlockingDispatcher::default(), identity)
}

/// A radio wired to `transport`, without the setup-time poll
pub fn test_radio(transport: Arc<MockTransport>) -> GatewayRadio {
    GatewayRadio::new(test_device(transport))
}
