use super::{
    error::ServiceError,
    service::{Handle, PropertyValue},
};
use crate::utils::time::{ole_automationtime_to_unixepoch, unixepoch_to_iso};

/// Read a string property
pub(crate) fn read_string<H: Handle>(handle: &H, name: &str) -> Result<String, ServiceError> {
    match handle.property(name)? {
        PropertyValue::Text(value) => Ok(value),
        // Unset BSTR values come back empty
        PropertyValue::Empty => Ok(String::new()),
        _ => Err(ServiceError::Decode),
    }
}

/// Read a boolean property
pub(crate) fn read_bool<H: Handle>(handle: &H, name: &str) -> Result<bool, ServiceError> {
    match handle.property(name)? {
        PropertyValue::Bool(value) => Ok(value),
        _ => Err(ServiceError::Decode),
    }
}

/// Read an integer property
pub(crate) fn read_int<H: Handle>(handle: &H, name: &str) -> Result<i32, ServiceError> {
    match handle.property(name)? {
        PropertyValue::Int(value) => Ok(value),
        _ => Err(ServiceError::Decode),
    }
}

/// Read an OLE date property and return it as an ISO8601 string
pub(crate) fn read_timestamp<H: Handle>(handle: &H, name: &str) -> Result<String, ServiceError> {
    match handle.property(name)? {
        PropertyValue::Date(value) if value.is_finite() => {
            Ok(unixepoch_to_iso(ole_automationtime_to_unixepoch(&value)))
        }
        _ => Err(ServiceError::Decode),
    }
}
