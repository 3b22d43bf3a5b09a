//! SQLite device repository.
//!
//! Sole mutator/reader of persisted asset state. Every write refreshes
//! `updated_at` with a server-side timestamp, runs as a single statement, and
//! is attempted once; storage faults surface as `DeviceError::Persistence`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use domain::errors::DeviceError;
use domain::models::{
    Computer, Device, DeviceCriteria, DeviceId, EnteredDevice, FrequentComputer, MedicalDevice,
};
use domain::repository::DeviceRepository;

use crate::criteria::translate;
use crate::entities::{
    ComputerEntity, EnteredDeviceEntity, FrequentComputerEntity, MedicalDeviceEntity,
};

const COMPUTER_COLUMNS: &str = "id, brand, model, color, photo_url, owner_id, owner_name, \
                                checkin_at, checkout_at, updated_at";

const MEDICAL_DEVICE_COLUMNS: &str = "id, brand, model, photo_url, owner_id, owner_name, \
                                      serial, checkin_at, checkout_at, updated_at";

const FREQUENT_COMPUTER_COLUMNS: &str = "id, brand, model, photo_url, owner_id, owner_name, \
                                         created_at, last_checkin_at, last_checkout_at, \
                                         updated_at";

/// Tagged union over the three asset tables. `color`/`serial` are aliased to
/// NULL where a kind lacks them and the frequent branch maps its last
/// checkin/checkout into the common timestamp columns, so outer predicates
/// and ordering see one uniform column set.
const DEVICE_UNION_SQL: &str = "\
    SELECT 'computer' AS kind, id, brand, model, color, NULL AS serial, photo_url, \
           owner_id, owner_name, checkin_at, checkout_at, updated_at \
    FROM computers \
    UNION ALL \
    SELECT 'medical-device', id, brand, model, NULL, serial, photo_url, \
           owner_id, owner_name, checkin_at, checkout_at, updated_at \
    FROM medical_devices \
    UNION ALL \
    SELECT 'frequent-computer', id, brand, model, NULL, NULL, photo_url, \
           owner_id, owner_name, last_checkin_at, last_checkout_at, updated_at \
    FROM frequent_computers";

const ENTERED_SQL: &str = "checkin_at IS NOT NULL \
                           AND (checkout_at IS NULL OR checkout_at < checkin_at)";

/// SQLite-backed implementation of the device repository.
#[derive(Clone)]
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
    base_url: String,
}

impl SqliteDeviceRepository {
    /// Creates a repository over `pool`. `base_url` seeds the derived
    /// frequent-computer checkin/checkout URLs.
    pub fn new(pool: SqlitePool, base_url: impl Into<String>) -> Self {
        Self {
            pool,
            base_url: base_url.into(),
        }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Resolves which table a checkout for `id` targets. A registered
    /// frequent computer shares its id with a computers row, so the fixed
    /// priority (computer, then medical device, then frequent computer) is
    /// made explicit instead of relying on union branch order.
    async fn find_device_kind(&self, id: DeviceId) -> Result<Option<String>, DeviceError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT kind FROM ( \
                 SELECT id, 'computer' AS kind, 1 AS priority FROM computers \
                 UNION ALL SELECT id, 'medical-device', 2 FROM medical_devices \
                 UNION ALL SELECT id, 'frequent-computer', 3 FROM frequent_computers \
             ) AS devices WHERE id = ? ORDER BY priority LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(kind,)| kind))
    }
}

#[async_trait]
impl DeviceRepository for SqliteDeviceRepository {
    async fn checkin_computer(&self, computer: Computer) -> Result<Computer, DeviceError> {
        let now = Utc::now();
        let checkin_at = computer.device.checkin_at.unwrap_or(now);

        let sql = format!(
            "INSERT INTO computers ({COMPUTER_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, ?) \
             ON CONFLICT(id) DO UPDATE SET \
                 brand = excluded.brand, \
                 model = excluded.model, \
                 color = excluded.color, \
                 photo_url = excluded.photo_url, \
                 owner_id = excluded.owner_id, \
                 owner_name = excluded.owner_name, \
                 checkin_at = excluded.checkin_at, \
                 updated_at = excluded.updated_at \
             RETURNING {COMPUTER_COLUMNS}"
        );

        let entity = sqlx::query_as::<_, ComputerEntity>(&sql)
            .bind(computer.device.id)
            .bind(&computer.device.brand)
            .bind(&computer.device.model)
            .bind(&computer.color)
            .bind(&computer.device.photo_url)
            .bind(&computer.device.owner.id)
            .bind(&computer.device.owner.name)
            .bind(checkin_at)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    async fn checkin_medical_device(
        &self,
        device: MedicalDevice,
    ) -> Result<MedicalDevice, DeviceError> {
        let now = Utc::now();
        let checkin_at = device.device.checkin_at.unwrap_or(now);

        let sql = format!(
            "INSERT INTO medical_devices ({MEDICAL_DEVICE_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, ?) \
             ON CONFLICT(id) DO UPDATE SET \
                 brand = excluded.brand, \
                 model = excluded.model, \
                 photo_url = excluded.photo_url, \
                 owner_id = excluded.owner_id, \
                 owner_name = excluded.owner_name, \
                 serial = excluded.serial, \
                 checkin_at = excluded.checkin_at, \
                 updated_at = excluded.updated_at \
             RETURNING {MEDICAL_DEVICE_COLUMNS}"
        );

        let entity = sqlx::query_as::<_, MedicalDeviceEntity>(&sql)
            .bind(device.device.id)
            .bind(&device.device.brand)
            .bind(&device.device.model)
            .bind(&device.device.photo_url)
            .bind(&device.device.owner.id)
            .bind(&device.device.owner.name)
            .bind(&device.serial)
            .bind(checkin_at)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| map_serial_conflict(err, &device.serial))?;

        Ok(entity.into())
    }

    async fn register_frequent_computer(
        &self,
        device: Device,
    ) -> Result<FrequentComputer, DeviceError> {
        let now = Utc::now();

        // Idempotent on the device id: re-registration refreshes the base
        // fields and keeps created_at and the last checkin/checkout cycle.
        let sql = format!(
            "INSERT INTO frequent_computers ({FREQUENT_COMPUTER_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
                 brand = excluded.brand, \
                 model = excluded.model, \
                 photo_url = excluded.photo_url, \
                 owner_id = excluded.owner_id, \
                 owner_name = excluded.owner_name, \
                 updated_at = excluded.updated_at \
             RETURNING {FREQUENT_COMPUTER_COLUMNS}"
        );

        let entity = sqlx::query_as::<_, FrequentComputerEntity>(&sql)
            .bind(device.id)
            .bind(&device.brand)
            .bind(&device.model)
            .bind(&device.photo_url)
            .bind(&device.owner.id)
            .bind(&device.owner.name)
            .bind(now)
            .bind(device.checkin_at)
            .bind(device.checkout_at)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into_domain(&self.base_url))
    }

    async fn checkin_frequent_computer(
        &self,
        id: DeviceId,
        timestamp: DateTime<Utc>,
    ) -> Result<FrequentComputer, DeviceError> {
        let sql = format!(
            "UPDATE frequent_computers \
             SET last_checkin_at = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {FREQUENT_COMPUTER_COLUMNS}"
        );

        let entity = sqlx::query_as::<_, FrequentComputerEntity>(&sql)
            .bind(timestamp)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DeviceError::NotFound { id })?;

        Ok(entity.into_domain(&self.base_url))
    }

    async fn checkout_device(
        &self,
        id: DeviceId,
        timestamp: DateTime<Utc>,
    ) -> Result<(), DeviceError> {
        let kind = self
            .find_device_kind(id)
            .await?
            .ok_or(DeviceError::NotFound { id })?;

        let sql = match kind.as_str() {
            "medical-device" => {
                "UPDATE medical_devices SET checkout_at = ?, updated_at = ? WHERE id = ?"
            }
            "frequent-computer" => {
                "UPDATE frequent_computers SET last_checkout_at = ?, updated_at = ? WHERE id = ?"
            }
            _ => "UPDATE computers SET checkout_at = ?, updated_at = ? WHERE id = ?",
        };

        let result = sqlx::query(sql)
            .bind(timestamp)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DeviceError::NotFound { id });
        }
        Ok(())
    }

    async fn get_computers(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<Computer>, DeviceError> {
        let query = translate(criteria)?;
        let sql = format!(
            "SELECT {COMPUTER_COLUMNS} FROM computers{}{}{}",
            query.where_sql(),
            query.order_sql(),
            query.limit_offset_sql()
        );

        let mut rows = sqlx::query_as::<_, ComputerEntity>(&sql);
        if let Some(predicate) = &query.predicate {
            rows = rows.bind(&predicate.value);
        }

        let entities = rows.fetch_all(&self.pool).await?;
        Ok(entities.into_iter().map(Computer::from).collect())
    }

    async fn get_medical_devices(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<MedicalDevice>, DeviceError> {
        let query = translate(criteria)?;
        let sql = format!(
            "SELECT {MEDICAL_DEVICE_COLUMNS} FROM medical_devices{}{}{}",
            query.where_sql(),
            query.order_sql(),
            query.limit_offset_sql()
        );

        let mut rows = sqlx::query_as::<_, MedicalDeviceEntity>(&sql);
        if let Some(predicate) = &query.predicate {
            rows = rows.bind(&predicate.value);
        }

        let entities = rows.fetch_all(&self.pool).await?;
        Ok(entities.into_iter().map(MedicalDevice::from).collect())
    }

    async fn get_frequent_computers(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<FrequentComputer>, DeviceError> {
        let query = translate(criteria)?;
        let sql = format!(
            "SELECT {FREQUENT_COMPUTER_COLUMNS} FROM frequent_computers{}{}{}",
            query.where_sql(),
            query.order_sql(),
            query.limit_offset_sql()
        );

        let mut rows = sqlx::query_as::<_, FrequentComputerEntity>(&sql);
        if let Some(predicate) = &query.predicate {
            rows = rows.bind(&predicate.value);
        }

        let entities = rows.fetch_all(&self.pool).await?;
        Ok(entities
            .into_iter()
            .map(|entity| entity.into_domain(&self.base_url))
            .collect())
    }

    async fn get_entered_devices(
        &self,
        criteria: &DeviceCriteria,
    ) -> Result<Vec<EnteredDevice>, DeviceError> {
        let query = translate(criteria)?;

        // One statement: entered predicate and criteria filter over the
        // aliased union, sort and pagination after the union.
        let sql = format!(
            "SELECT kind, id, brand, model, color, serial, photo_url, owner_id, owner_name, \
                    checkin_at, checkout_at, updated_at \
             FROM ({DEVICE_UNION_SQL}) AS devices \
             WHERE {ENTERED_SQL}{}{}{}",
            query.and_filter_sql(),
            query.order_sql(),
            query.limit_offset_sql()
        );

        let mut rows = sqlx::query_as::<_, EnteredDeviceEntity>(&sql);
        if let Some(predicate) = &query.predicate {
            rows = rows.bind(&predicate.value);
        }

        let entities = rows.fetch_all(&self.pool).await?;
        Ok(entities.into_iter().map(EnteredDevice::from).collect())
    }

    async fn is_device_entered(&self, id: DeviceId) -> Result<bool, DeviceError> {
        // An id can span tables: a registered frequent computer keeps its
        // original computers row. The device is entered when any of its
        // records is, so the predicate runs over every matching row.
        let sql = format!(
            "SELECT EXISTS( \
                 SELECT 1 FROM ({DEVICE_UNION_SQL}) AS devices \
                 WHERE id = ? AND {ENTERED_SQL} \
             )"
        );

        let (exists,): (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(exists)
    }

    async fn has_device_checked_in(&self, id: DeviceId) -> Result<bool, DeviceError> {
        let sql = format!(
            "SELECT EXISTS( \
                 SELECT 1 FROM ({DEVICE_UNION_SQL}) AS devices \
                 WHERE id = ? AND checkin_at IS NOT NULL \
             )"
        );

        let (exists,): (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(exists)
    }

    async fn is_frequent_computer_registered(&self, id: DeviceId) -> Result<bool, DeviceError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM frequent_computers WHERE id = ?)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

/// Classifies a unique violation on the medical device serial; everything else
/// stays a storage fault.
fn map_serial_conflict(err: sqlx::Error, serial: &str) -> DeviceError {
    if let sqlx::Error::Database(db_err) = &err {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
            && db_err.message().contains("medical_devices.serial")
        {
            tracing::warn!(serial, "rejected medical device with duplicate serial");
            return DeviceError::DuplicateSerial {
                serial: serial.to_string(),
            };
        }
    }
    DeviceError::Persistence(err)
}
