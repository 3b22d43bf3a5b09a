//! Database row mappings.

pub mod computer;
pub mod entered_device;
pub mod frequent_computer;
pub mod medical_device;

pub use computer::ComputerEntity;
pub use entered_device::EnteredDeviceEntity;
pub use frequent_computer::FrequentComputerEntity;
pub use medical_device::MedicalDeviceEntity;
