//! Device domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Globally unique identifier for a tracked asset.
pub type DeviceId = Uuid;

/// Immutable reference to the person responsible for an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceOwner {
    #[validate(length(min = 1, message = "Owner id must not be empty"))]
    pub id: String,

    #[validate(length(min = 1, message = "Owner name must not be empty"))]
    pub name: String,
}

/// Fields shared by every tracked asset kind.
///
/// A device is *entered* iff `checkin_at` is set and `checkout_at` is unset or
/// predates the latest checkin. `updated_at` is refreshed on every mutation
/// and never decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,

    #[validate(length(min = 1, message = "Brand must not be empty"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Model must not be empty"))]
    pub model: String,

    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: String,

    #[validate(nested)]
    pub owner: DeviceOwner,

    pub checkin_at: Option<DateTime<Utc>>,
    pub checkout_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Device {
    /// Whether the asset is currently inside the facility.
    pub fn is_entered(&self) -> bool {
        is_entered(self.checkin_at, self.checkout_at)
    }
}

/// Evaluates the entered predicate for a checkin/checkout timestamp pair.
pub fn is_entered(checkin_at: Option<DateTime<Utc>>, checkout_at: Option<DateTime<Utc>>) -> bool {
    match (checkin_at, checkout_at) {
        (Some(_), None) => true,
        (Some(checkin), Some(checkout)) => checkout < checkin,
        _ => false,
    }
}

/// A tracked computer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Computer {
    #[serde(flatten)]
    #[validate(nested)]
    pub device: Device,

    pub color: Option<String>,
}

/// A tracked medical device. `serial` is unique across all medical devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MedicalDevice {
    #[serde(flatten)]
    #[validate(nested)]
    pub device: Device,

    #[validate(length(min = 1, message = "Serial must not be empty"))]
    pub serial: String,
}

/// A computer pre-registered for expedited checkin/checkout.
///
/// `device.checkin_at`/`device.checkout_at` carry the last checkin/checkout of
/// the expedited cycle. `checkin_url`/`checkout_url` are derived on read from
/// the device id and the configured base URL; they are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequentComputer {
    #[serde(flatten)]
    pub device: Device,

    pub created_at: DateTime<Utc>,
    pub checkin_url: String,
    pub checkout_url: String,
}

/// An asset currently inside the facility, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum EnteredDevice {
    #[serde(rename = "computer")]
    Computer(Computer),

    #[serde(rename = "medical-device")]
    MedicalDevice(MedicalDevice),

    #[serde(rename = "frequent-computer")]
    FrequentComputer(Device),
}

impl EnteredDevice {
    pub fn device(&self) -> &Device {
        match self {
            EnteredDevice::Computer(c) => &c.device,
            EnteredDevice::MedicalDevice(m) => &m.device,
            EnteredDevice::FrequentComputer(d) => d,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EnteredDevice::Computer(_) => "computer",
            EnteredDevice::MedicalDevice(_) => "medical-device",
            EnteredDevice::FrequentComputer(_) => "frequent-computer",
        }
    }
}
