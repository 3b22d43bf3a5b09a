//! Kind-agnostic device operations: checkout and the entered view.

use std::sync::Arc;

use chrono::Utc;

use crate::errors::DeviceError;
use crate::models::{DeviceCriteria, DeviceId, EnteredDevice};
use crate::repository::DeviceRepository;

pub struct DeviceService<R> {
    repository: Arc<R>,
}

impl<R> DeviceService<R>
where
    R: DeviceRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records a checkout for whichever kind owns `id`; unknown ids fail with
    /// [`DeviceError::NotFound`].
    pub async fn checkout_device(&self, id: DeviceId) -> Result<(), DeviceError> {
        tracing::info!(device_id = %id, "checking out device");
        self.repository.checkout_device(id, Utc::now()).await
    }

    pub async fn get_entered_devices(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<EnteredDevice>, DeviceError> {
        self.repository.get_entered_devices(criteria).await
    }

    pub async fn is_device_entered(&self, id: DeviceId) -> Result<bool, DeviceError> {
        self.repository.is_device_entered(id).await
    }

    pub async fn is_frequent_computer_registered(
        &self,
        id: DeviceId,
    ) -> Result<bool, DeviceError> {
        self.repository.is_frequent_computer_registered(id).await
    }
}
