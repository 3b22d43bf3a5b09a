//! Repository implementations.

pub mod device;

pub use device::SqliteDeviceRepository;
