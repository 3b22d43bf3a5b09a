//! Computer entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Computer, Device, DeviceOwner};

/// Database row mapping for the computers table.
#[derive(Debug, Clone, FromRow)]
pub struct ComputerEntity {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub color: Option<String>,
    pub photo_url: String,
    pub owner_id: String,
    pub owner_name: String,
    pub checkin_at: Option<DateTime<Utc>>,
    pub checkout_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<ComputerEntity> for Computer {
    fn from(entity: ComputerEntity) -> Self {
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
            color: entity.color,
        }
    }
}
