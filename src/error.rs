//! Error types for the lobby tool
//!
//! Domain failures are described by [`LobbyError`] and carried through the
//! application as `anyhow` errors, so callers can still downcast to them.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Failures that abort a run
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Cannot find {process_name} instance")]
    ProcessNotFound { process_name: String },

    #[error("Cannot determine app port and token: {reason}")]
    CredentialsNotFound { reason: String },

    #[error("Cannot create lobby (status {status})")]
    LobbyCreationFailed { status: u16 },

    #[error("Cannot request available bots (status {status})")]
    BotRosterFetchFailed { status: u16 },

    #[error(
        "Cannot add bot with champion_id={champion_id} team_id={team} difficulty={difficulty} (status {status})"
    )]
    AddBotFailed {
        champion_id: i64,
        team: String,
        difficulty: String,
        status: u16,
    },

    #[error("Cannot find a bot by the name of \"{name}\"")]
    UnknownChampion { name: String },

    #[error("Not enough champions for random picks: need {needed}, only {available} left")]
    NotEnoughChampions { needed: usize, available: usize },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl LobbyError {
    /// Shorthand for an [`LobbyError::InvalidArgument`]
    pub fn invalid(reason: impl Into<String>) -> Self {
        LobbyError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
