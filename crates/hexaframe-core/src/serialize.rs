//! Explicit serialization capability for output DTOs.
//!
//! Anything that implements [`serde::Serialize`] can be turned into a
//! [`serde_json::Value`]: structs become objects, sequences become arrays,
//! `chrono` timestamps become RFC 3339 strings, unit enum variants become
//! their names.

use serde::Serialize;
use serde_json::Value;

use crate::error::{HexaError, HexaResult, codes};

/// Conversion of a DTO into a transport-neutral JSON value.
pub trait ToSerializable {
    fn to_serializable(&self) -> HexaResult<Value>;
}

impl<T: Serialize + ?Sized> ToSerializable for T {
    fn to_serializable(&self) -> HexaResult<Value> {
        serde_json::to_value(self).map_err(|e| {
            HexaError::infra(codes::SERIALIZATION_ERROR, format!("failed to serialize output: {e}"))
        })
    }
}
