//! Domain services for the Gatehouse device tracker.
//!
//! Services validate caller input, generate ids, orchestrate the photo
//! collaborator, enforce business preconditions, and delegate to the
//! repository. Repository errors propagate unchanged.

pub mod computer;
pub mod device;
pub mod medical_device;

pub use computer::ComputerService;
pub use device::DeviceService;
pub use medical_device::MedicalDeviceService;
