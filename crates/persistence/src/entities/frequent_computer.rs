//! Frequent computer entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Device, DeviceOwner, FrequentComputer};

/// Database row mapping for the frequent_computers table.
///
/// The checkin/checkout URLs are not columns; they are derived from the id and
/// the configured base URL on every read.
#[derive(Debug, Clone, FromRow)]
pub struct FrequentComputerEntity {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub photo_url: String,
    pub owner_id: String,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
    pub last_checkin_at: Option<DateTime<Utc>>,
    pub last_checkout_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl FrequentComputerEntity {
    pub fn into_domain(self, base_url: &str) -> FrequentComputer {
        FrequentComputer {
            checkin_url: shared::urls::frequent_checkin_url(base_url, self.id),
            checkout_url: shared::urls::frequent_checkout_url(base_url, self.id),
            created_at: self.created_at,
            device: Device {
                id: self.id,
                brand: self.brand,
                model: self.model,
                photo_url: self.photo_url,
                owner: DeviceOwner {
                    id: self.owner_id,
                    name: self.owner_name,
                },
                checkin_at: self.last_checkin_at,
                checkout_at: self.last_checkout_at,
                updated_at: self.updated_at,
            },
        }
    }
}
