//! Configuration module
//!
//! Environment-driven application configuration with an optional TOML
//! config file layered underneath.

pub mod app_config;

pub use app_config::{AppConfig, ConfigError, DEFAULT_AWS_REGION};
