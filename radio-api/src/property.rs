//! Property descriptors for polled devices
//!
//! Legacy miIO getters take a flat list of property names. The scoped MIoT
//! getter (`get_properties`) instead takes descriptors that address each
//! property by service id and property id:
//!
//! ```json
//! {"did": "volume", "siid": 2, "piid": 1, "name": "volume"}
//! ```
//!
//! Descriptors are parsed strictly; anything that does not match this shape
//! is rejected with [`ApiError::ParseError`].

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Getter method that takes scoped property descriptors
pub const SCOPED_PROPERTIES_GETTER: &str = "get_properties";

/// A single scoped property address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDescriptor {
    pub did: String,
    pub siid: u32,
    pub piid: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PropertyDescriptor {
    /// Parse one descriptor from its JSON text
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        serde_json::from_str(text)
            .map_err(|e| ApiError::ParseError(format!("invalid property descriptor '{}': {}", text, e)))
    }

    /// `(siid, piid)` pair identifying the property on the device
    pub fn key(&self) -> (u32, u32) {
        (self.siid, self.piid)
    }

    /// Display label: the explicit name, else the device id
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.did)
    }
}

/// The set of properties a device adapter polls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySet {
    /// Plain property names for legacy getters, de-duplicated in first-seen order
    Names(Vec<String>),
    /// Scoped descriptors, unique by `(siid, piid)`, in first-seen order
    Scoped(Vec<PropertyDescriptor>),
}

impl Default for PropertySet {
    fn default() -> Self {
        PropertySet::Names(Vec::new())
    }
}

impl PropertySet {
    /// Interpret `properties` according to the getter that will fetch them
    ///
    /// For [`SCOPED_PROPERTIES_GETTER`] every entry must be a descriptor; a
    /// later descriptor with the same `(siid, piid)` replaces an earlier one
    /// in its original position.
    /// For any other getter the entries are property names.
    pub fn parse<S: AsRef<str>>(getter: &str, properties: &[S]) -> Result<Self, ApiError> {
        if getter != SCOPED_PROPERTIES_GETTER {
            let mut seen = HashSet::new();
            let names = properties
                .iter()
                .map(|p| p.as_ref().to_string())
                .filter(|p| seen.insert(p.clone()))
                .collect();
            return Ok(PropertySet::Names(names));
        }

        let mut scoped: Vec<PropertyDescriptor> = Vec::new();
        let mut index = HashMap::new();
        for text in properties {
            let descriptor = PropertyDescriptor::parse(text.as_ref())?;
            let key = descriptor.key();
            if let Some(slot) = index.get(&key).copied() {
                scoped[slot] = descriptor;
            } else {
                index.insert(key, scoped.len());
                scoped.push(descriptor);
            }
        }
        Ok(PropertySet::Scoped(scoped))
    }

    /// Labels to request from the device
    pub fn names(&self) -> Vec<String> {
        match self {
            PropertySet::Names(names) => names.clone(),
            PropertySet::Scoped(scoped) => scoped.iter().map(|d| d.label().to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PropertySet::Names(names) => names.len(),
            PropertySet::Scoped(scoped) => scoped.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
