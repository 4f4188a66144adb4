//! CLI output: error mapping and JSON rendering.

use crate::error::ApiError;
use serde::Serialize;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::StorageError(inner) => format!("Error: {}", inner),
        other => format!("Error: {}", other),
    }
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ApiError::StorageError(crate::error::StorageError::Serialization(e.to_string()))
    })
}
