//! Photo object-name derivation.
//!
//! The photo storage collaborator persists uploaded bytes under a name derived
//! from the device id, the upload timestamp, and a sanitized copy of the
//! original file name. The derivation is pure so adapters and tests agree on
//! the exact name.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Derives the storage object name for an uploaded photo:
/// `{deviceId}-{millis}-{sanitizedName}`.
pub fn photo_object_name(device_id: Uuid, uploaded_at: DateTime<Utc>, original_name: &str) -> String {
    format!(
        "{}-{}-{}",
        device_id,
        uploaded_at.timestamp_millis(),
        sanitize_file_name(original_name)
    )
}

/// Collapses whitespace runs to underscores and strips path separators.
/// An empty result falls back to `upload`.
pub fn sanitize_file_name(name: &str) -> String {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined.chars().filter(|c| *c != '/' && *c != '\\').collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
