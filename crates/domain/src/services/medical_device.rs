//! Medical device lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::errors::DeviceError;
use crate::models::{CheckinMedicalDeviceRequest, Device, DeviceCriteria, MedicalDevice};
use crate::repository::{DevicePhotoRepository, DeviceRepository};

pub struct MedicalDeviceService<R, P> {
    repository: Arc<R>,
    photos: Arc<P>,
}

impl<R, P> MedicalDeviceService<R, P>
where
    R: DeviceRepository,
    P: DevicePhotoRepository,
{
    pub fn new(repository: Arc<R>, photos: Arc<P>) -> Self {
        Self { repository, photos }
    }

    /// Checks in a medical device. A serial collision surfaces as
    /// [`DeviceError::DuplicateSerial`] straight from the repository.
    pub async fn checkin_medical_device(
        &self,
        request: CheckinMedicalDeviceRequest,
    ) -> Result<MedicalDevice, DeviceError> {
        request.validate()?;

        let id = request.id.unwrap_or_else(shared::ids::generate_device_id);
        let photo_url = self
            .photos
            .save_photo(&request.photo.bytes, &request.photo.file_name, id)
            .await?;

        let medical_device = MedicalDevice {
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
            serial: request.serial,
        };
        medical_device.validate()?;

        tracing::info!(device_id = %id, "checking in medical device");
        self.repository.checkin_medical_device(medical_device).await
    }

    pub async fn get_medical_devices(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<MedicalDevice>, DeviceError> {
        self.repository.get_medical_devices(criteria).await
    }
}
