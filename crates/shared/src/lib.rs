//! Shared utilities for the Gatehouse device tracker.
//!
//! This crate provides common functionality used across the other crates:
//! - Device id generation
//! - Photo object-name derivation
//! - Frequent-computer URL derivation

pub mod ids;
pub mod photo;
pub mod urls;
