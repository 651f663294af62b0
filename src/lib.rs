//! Poro Lobby - custom game lobbies full of bots
//!
//! This crate creates a custom game or practice tool lobby through the local
//! game client's control API and fills both teams with bots, each with a
//! chosen or random champion and a difficulty.

pub mod bot;
pub mod client;
pub mod config;
pub mod error;
pub mod lobby;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LobbyError, Result};
pub use types::*;

// Re-export key components
pub use client::{ControlApi, HttpControlApi};
pub use lobby::LobbyOrchestrator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
