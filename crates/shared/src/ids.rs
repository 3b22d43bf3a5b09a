//! Device id generation.

use uuid::Uuid;

/// Generates a new globally-unique device id.
///
/// Used by the service layer when a caller checks in a device without
/// supplying an id of its own.
pub fn generate_device_id() -> Uuid {
    Uuid::new_v4()
}
