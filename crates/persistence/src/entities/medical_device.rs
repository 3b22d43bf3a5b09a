//! Medical device entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Device, DeviceOwner, MedicalDevice};

/// Database row mapping for the medical_devices table.
#[derive(Debug, Clone, FromRow)]
pub struct MedicalDeviceEntity {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub photo_url: String,
    pub owner_id: String,
    pub owner_name: String,
    pub serial: String,
    pub checkin_at: Option<DateTime<Utc>>,
    pub checkout_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<MedicalDeviceEntity> for MedicalDevice {
    fn from(entity: MedicalDeviceEntity) -> Self {
        Self {
            device: Device {
                id: entity.id,
                brand: entity.brand,
                model: entity.model,
                photo_url: entity.photo_url,
                owner: DeviceOwner {
                    id: entity.owner_id,
                    name: entity.owner_name,
                },
                checkin_at: entity.checkin_at,
                checkout_at: entity.checkout_at,
                updated_at: entity.updated_at,
            },
            serial: entity.serial,
        }
    }
}
