//! Frequent-computer URL derivation.
//!
//! Checkin/checkout URLs for frequent computers are never persisted; they are
//! recomputed on every read from the device id and the configured base URL.

use uuid::Uuid;

/// Derives the expedited checkin URL: `{base}/devices/{id}/checkin`.
pub fn frequent_checkin_url(base_url: &str, device_id: Uuid) -> String {
    format!("{}/devices/{}/checkin", base_url.trim_end_matches('/'), device_id)
}

/// Derives the expedited checkout URL: `{base}/devices/{id}/checkout`.
pub fn frequent_checkout_url(base_url: &str, device_id: Uuid) -> String {
    format!("{}/devices/{}/checkout", base_url.trim_end_matches('/'), device_id)
}
