//! Lobby creation and bot population
//!
//! This module runs the end-to-end flow against the client's control API.

pub mod orchestrator;

// Re-export commonly used types
pub use orchestrator::{LobbyOrchestrator, RunState, RunSummary};
