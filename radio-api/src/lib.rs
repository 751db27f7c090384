//! Typed command vocabulary for the Xiaomi gateway FM radio
//!
//! This crate provides a type-safe, trait-based view of the three vendor
//! methods the gateway radio understands. It does not perform I/O: each
//! operation builds positional params and decodes the raw JSON answer, and
//! the caller decides how to run the blocking call through `miio-client`.
//!
//! ```rust
//! use radio_api::operations::{VolumeCtrlFmOperation, VolumeCtrlFmRequest};
//! use radio_api::MiioOperation;
//!
//! let params = VolumeCtrlFmOperation::build_params(&VolumeCtrlFmRequest::new(0.5)).unwrap();
//! assert_eq!(params, vec![serde_json::json!("50.0")]);
//! ```

pub mod ack;
pub mod error;
pub mod operation;
pub mod operations;
pub mod property;

pub use ack::Ack;
pub use error::{ApiError, Result};
pub use operation::{MiioOperation, OperationMetadata, ValidationError};
pub use property::{PropertyDescriptor, PropertySet, SCOPED_PROPERTIES_GETTER};
