//! Entered device entity: one row shape for the tagged union of the three
//! asset tables.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Computer, Device, DeviceOwner, EnteredDevice, MedicalDevice};

/// Row produced by the UNION ALL over computers, medical_devices, and
/// frequent_computers. `color` and `serial` are NULL for kinds that lack them;
/// the frequent branch aliases its last checkin/checkout timestamps into the
/// common columns.
#[derive(Debug, Clone, FromRow)]
pub struct EnteredDeviceEntity {
    pub kind: String,
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub color: Option<String>,
    pub serial: Option<String>,
    pub photo_url: String,
    pub owner_id: String,
    pub owner_name: String,
    pub checkin_at: Option<DateTime<Utc>>,
    pub checkout_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<EnteredDeviceEntity> for EnteredDevice {
    fn from(entity: EnteredDeviceEntity) -> Self {
        let device = Device {
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
        };

        match entity.kind.as_str() {
            "medical-device" => EnteredDevice::MedicalDevice(MedicalDevice {
                device,
                serial: entity.serial.unwrap_or_default(),
            }),
            "frequent-computer" => EnteredDevice::FrequentComputer(device),
            // Kind tags come from our own SQL literals.
            _ => EnteredDevice::Computer(Computer {
                device,
                color: entity.color,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(kind: &str) -> EnteredDeviceEntity {
        EnteredDeviceEntity {
            kind: kind.to_string(),
            id: Uuid::new_v4(),
            brand: "Dell".to_string(),
            model: "XPS".to_string(),
            color: Some("silver".to_string()),
            serial: Some("SN-1".to_string()),
            photo_url: "http://photos.local/xps.jpg".to_string(),
            owner_id: "owner-1".to_string(),
            owner_name: "Ada".to_string(),
            checkin_at: Some(Utc::now()),
            checkout_at: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_kind_tag_selects_variant() {
        assert_eq!(EnteredDevice::from(entity("computer")).kind(), "computer");
        assert_eq!(
            EnteredDevice::from(entity("medical-device")).kind(),
            "medical-device"
        );
        assert_eq!(
            EnteredDevice::from(entity("frequent-computer")).kind(),
            "frequent-computer"
        );
    }

    #[test]
    fn test_medical_variant_carries_serial() {
        match EnteredDevice::from(entity("medical-device")) {
            EnteredDevice::MedicalDevice(m) => assert_eq!(m.serial, "SN-1"),
            other => panic!("expected medical device, got {}", other.kind()),
        }
    }
}
