//! Configuration module for ermap.
//!
//! Handles connection strings, environment variables, and settings.

mod connection;
mod settings;

pub use connection::{ConnectionError, Driver, Dsn};
pub use settings::{expand_env_vars, ImportSettings, OutputSettings, Settings, SettingsError};
