//! Typed property values and object discovery results.

use std::collections::HashMap;

use crate::error::{TransportError, TransportResult};

/// A property value marshaled to or from the network-management service.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    String(String),
}

impl Value {
    pub fn as_bool(&self) -> TransportResult<bool> {
        match self {
            Value::Bool(v) => Ok(*v),
            other => Err(type_error("bool", other)),
        }
    }

    pub fn as_u8(&self) -> TransportResult<u8> {
        match self {
            Value::U8(v) => Ok(*v),
            other => Err(type_error("u8", other)),
        }
    }

    pub fn as_u32(&self) -> TransportResult<u32> {
        match self {
            Value::U32(v) => Ok(*v),
            other => Err(type_error("u32", other)),
        }
    }

    pub fn as_str(&self) -> TransportResult<&str> {
        match self {
            Value::String(v) => Ok(v),
            other => Err(type_error("string", other)),
        }
    }
}

fn type_error(expected: &str, got: &Value) -> TransportError {
    TransportError::invalid_value(format!("expected {expected}, got {got:?}"))
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// Properties of one object under one interface.
pub type PropertyMap = HashMap<String, Value>;

/// Discovery result: object path with its owning services and the
/// interfaces each service implements on it.
pub type ObjectTree = Vec<(String, Vec<(String, Vec<String>)>)>;
