//! Configuration management for the lobby tool
//!
//! This module handles configuration loading from a TOML file or environment
//! variables, validation, and default values.

pub mod app;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ClientSettings, LobbySettings, ServiceSettings};
