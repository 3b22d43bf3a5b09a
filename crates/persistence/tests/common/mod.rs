//! Shared helpers for persistence integration tests.

#![allow(dead_code)]

use chrono::Utc;
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::SqlitePool;
use uuid::Uuid;

use domain::models::{Computer, Device, DeviceOwner, MedicalDevice};
use persistence::db::{self, DatabaseConfig};
use persistence::repositories::SqliteDeviceRepository;

pub const BASE_URL: &str = "http://localhost:3000";

pub async fn test_pool() -> anyhow::Result<SqlitePool> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connect_timeout_secs: 5,
        idle_timeout_secs: 600,
    };
    let pool = db::create_pool(&config).await?;
    db::init_schema(&pool).await?;
    Ok(pool)
}

pub async fn repository() -> anyhow::Result<SqliteDeviceRepository> {
    Ok(SqliteDeviceRepository::new(test_pool().await?, BASE_URL))
}

pub fn owner() -> DeviceOwner {
    DeviceOwner {
        id: "owner-1".to_string(),
        name: Name().fake(),
    }
}

pub fn device(brand: &str) -> Device {
    Device {
        id: Uuid::new_v4(),
        brand: brand.to_string(),
        model: "generic".to_string(),
        photo_url: "http://photos.local/device.jpg".to_string(),
        owner: owner(),
        checkin_at: None,
        checkout_at: None,
        updated_at: Utc::now(),
    }
}

pub fn computer(brand: &str) -> Computer {
    Computer {
        device: device(brand),
        color: Some("black".to_string()),
    }
}

pub fn medical_device(serial: &str) -> MedicalDevice {
    MedicalDevice {
        device: device("Philips"),
        serial: serial.to_string(),
    }
}
