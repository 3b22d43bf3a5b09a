//! Domain layer for the Gatehouse device tracker.
//!
//! This crate contains:
//! - Domain models (Computer, MedicalDevice, FrequentComputer) and criteria types
//! - The repository and photo-storage ports
//! - Business logic services
//! - The domain error taxonomy

pub mod errors;
pub mod models;
pub mod repository;
pub mod services;
