//! Computer lifecycle service: checkin, frequent registration, queries.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::errors::DeviceError;
use crate::models::{
    CheckinComputerRequest, Computer, Device, DeviceCriteria, DeviceId, FrequentComputer,
    RegisterFrequentComputerRequest,
};
use crate::repository::{DevicePhotoRepository, DeviceRepository};

pub struct ComputerService<R, P> {
    repository: Arc<R>,
    photos: Arc<P>,
}

impl<R, P> ComputerService<R, P>
where
    R: DeviceRepository,
    P: DevicePhotoRepository,
{
    pub fn new(repository: Arc<R>, photos: Arc<P>) -> Self {
        Self { repository, photos }
    }

    /// Checks in a computer. Generates an id when the caller supplies none and
    /// stores the photo before the record is persisted.
    pub async fn checkin_computer(
        &self,
        request: CheckinComputerRequest,
    ) -> Result<Computer, DeviceError> {
        request.validate()?;

        let id = request.id.unwrap_or_else(shared::ids::generate_device_id);
        let photo_url = self
            .photos
            .save_photo(&request.photo.bytes, &request.photo.file_name, id)
            .await?;

        let computer = Computer {
            device: Device {
                id,
                brand: request.brand,
                model: request.model,
                photo_url,
                owner: request.owner,
                checkin_at: None,
                checkout_at: None,
                updated_at: Utc::now(),
            },
            color: request.color,
        };
        computer.validate()?;

        tracing::info!(device_id = %id, "checking in computer");
        self.repository.checkin_computer(computer).await
    }

    /// Registers a computer for expedited checkin/checkout.
    ///
    /// Requires that the device was checked in at least once beforehand;
    /// otherwise the registration fails with [`DeviceError::Precondition`].
    pub async fn register_frequent_computer(
        &self,
        request: RegisterFrequentComputerRequest,
    ) -> Result<FrequentComputer, DeviceError> {
        request.validate()?;

        if !self.repository.has_device_checked_in(request.id).await? {
            return Err(DeviceError::Precondition(format!(
                "device {} has never been checked in",
                request.id
            )));
        }

        let photo_url = self
            .photos
            .save_photo(&request.photo.bytes, &request.photo.file_name, request.id)
            .await?;

        let device = Device {
            id: request.id,
            brand: request.brand,
            model: request.model,
            photo_url,
            owner: request.owner,
            checkin_at: None,
            checkout_at: None,
            updated_at: Utc::now(),
        };
        device.validate()?;

        tracing::info!(device_id = %request.id, "registering frequent computer");
        self.repository.register_frequent_computer(device).await
    }

    /// Records an expedited checkin for a registered frequent computer.
    pub async fn checkin_frequent_computer(
        &self,
        id: DeviceId,
    ) -> Result<FrequentComputer, DeviceError> {
        tracing::info!(device_id = %id, "expedited checkin");
        self.repository.checkin_frequent_computer(id, Utc::now()).await
    }

    pub async fn get_computers(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<Computer>, DeviceError> {
        self.repository.get_computers(criteria).await
    }

    pub async fn get_frequent_computers(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<FrequentComputer>, DeviceError> {
        self.repository.get_frequent_computers(criteria).await
    }
}
