//! Domain error taxonomy.
//!
//! One variant per caller-facing signal; the boundary must never collapse
//! not-found, conflict, and bad-request into a single error.

use thiserror::Error;

use crate::models::DeviceId;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported filter/sort field: {field}")]
    UnsupportedField { field: String },

    #[error("Medical device serial already registered: {serial}")]
    DuplicateSerial { serial: String },

    #[error("Device not found: {id}")]
    NotFound { id: DeviceId },

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Storage error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl From<validator::ValidationErrors> for DeviceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let message = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        DeviceError::Validation(details.join("; "))
    }
}
