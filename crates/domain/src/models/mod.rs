//! Domain models for the Gatehouse device tracker.

pub mod criteria;
pub mod device;
pub mod requests;

pub use criteria::{DeviceCriteria, FilterBy, SortBy};
pub use device::{
    is_entered, Computer, Device, DeviceId, DeviceOwner, EnteredDevice, FrequentComputer,
    MedicalDevice,
};
pub use requests::{
    CheckinComputerRequest, CheckinMedicalDeviceRequest, PhotoUpload,
    RegisterFrequentComputerRequest,
};
