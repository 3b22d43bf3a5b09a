//! Validated request payloads consumed by the service layer.

use uuid::Uuid;
use validator::Validate;

use super::device::DeviceOwner;

/// Raw photo bytes handed over by the caller together with the original
/// file name.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// Request to check in a computer. When `id` is absent the service generates
/// one.
#[derive(Debug, Clone, Validate)]
pub struct CheckinComputerRequest {
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "Brand must not be empty"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Model must not be empty"))]
    pub model: String,

    pub color: Option<String>,

    #[validate(nested)]
    pub owner: DeviceOwner,

    pub photo: PhotoUpload,
}

/// Request to check in a medical device.
#[derive(Debug, Clone, Validate)]
pub struct CheckinMedicalDeviceRequest {
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "Brand must not be empty"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Model must not be empty"))]
    pub model: String,

    #[validate(length(min = 1, message = "Serial must not be empty"))]
    pub serial: String,

    #[validate(nested)]
    pub owner: DeviceOwner,

    pub photo: PhotoUpload,
}

/// Request to register an already checked-in computer as frequent. The id is
/// mandatory here: registration refers to a device with a prior checkin.
#[derive(Debug, Clone, Validate)]
pub struct RegisterFrequentComputerRequest {
    pub id: Uuid,

    #[validate(length(min = 1, message = "Brand must not be empty"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Model must not be empty"))]
    pub model: String,

    #[validate(nested)]
    pub owner: DeviceOwner,

    pub photo: PhotoUpload,
}
