//! Core types and shared functionality for rdr.
//!
//! This crate provides:
//! - The resolved `Settings` value and its on-disk store
//! - Configuration error types

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{Settings, SettingsStore, mask_secret};
