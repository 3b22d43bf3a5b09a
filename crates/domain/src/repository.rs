//! Ports implemented by storage adapters and consumed by the service layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DeviceError;
use crate::models::{
    Computer, Device, DeviceCriteria, DeviceId, EnteredDevice, FrequentComputer, MedicalDevice,
};

/// Sole owner of persisted asset state.
///
/// Every write is atomic at the single-record level, refreshes `updated_at`,
/// and is attempted exactly once; storage faults surface as
/// [`DeviceError::Persistence`] without retry. Each operation runs as an
/// independent transaction, so concurrent writers to the same id serialize
/// inside the engine (last write wins).
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Persists a computer checkin. `checkin_at` defaults to now when absent.
    /// Re-checkin of a known id mutates the existing record.
    async fn checkin_computer(&self, computer: Computer) -> Result<Computer, DeviceError>;

    /// Persists a medical device checkin. Fails with
    /// [`DeviceError::DuplicateSerial`] when the serial belongs to another
    /// device.
    async fn checkin_medical_device(
        &self,
        device: MedicalDevice,
    ) -> Result<MedicalDevice, DeviceError>;

    /// Persists a frequent-computer registration. Idempotent on the device id:
    /// re-registering refreshes the base fields and keeps `created_at`.
    /// The returned record carries the derived checkin/checkout URLs.
    async fn register_frequent_computer(
        &self,
        device: Device,
    ) -> Result<FrequentComputer, DeviceError>;

    /// Records an expedited checkin for a registered frequent computer.
    async fn checkin_frequent_computer(
        &self,
        id: DeviceId,
        timestamp: DateTime<Utc>,
    ) -> Result<FrequentComputer, DeviceError>;

    /// Records a checkout for whichever kind owns `id`. Fails with
    /// [`DeviceError::NotFound`] when no record exists.
    async fn checkout_device(
        &self,
        id: DeviceId,
        timestamp: DateTime<Utc>,
    ) -> Result<(), DeviceError>;

    async fn get_computers(&self, criteria: &DeviceCriteria)
        -> Result<Vec<Computer>, DeviceError>;

    async fn get_medical_devices(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<MedicalDevice>, DeviceError>;

    async fn get_frequent_computers(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<FrequentComputer>, DeviceError>;

    /// All currently entered assets across the three kinds, kind-tagged.
    /// Sort and pagination apply to the unioned result.
    async fn get_entered_devices(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<EnteredDevice>, DeviceError>;

    /// Whether `id` is currently inside the facility.
    async fn is_device_entered(&self, id: DeviceId) -> Result<bool, DeviceError>;

    /// Whether any record for `id` carries a checkin timestamp.
    async fn has_device_checked_in(&self, id: DeviceId) -> Result<bool, DeviceError>;

    async fn is_frequent_computer_registered(&self, id: DeviceId) -> Result<bool, DeviceError>;
}

/// Photo storage collaborator. The returned URL must later resolve to the
/// exact submitted bytes.
#[async_trait]
pub trait DevicePhotoRepository: Send + Sync {
    async fn save_photo(
        &self,
        bytes: &[u8],
        original_name: &str,
        device_id: DeviceId,
    ) -> Result<String, DeviceError>;
}
