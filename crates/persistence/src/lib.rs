//! Persistence layer for the Gatehouse device tracker.
//!
//! This crate contains:
//! - SQLite connection management and schema bootstrap
//! - Entity definitions (database row mappings)
//! - The criteria-to-SQL translator
//! - The `DeviceRepository` implementation

pub mod criteria;
pub mod db;
pub mod entities;
pub mod repositories;
