//! Main application configuration
//!
//! All settings are resolved once at startup into an immutable [`AppConfig`]
//! that is passed by reference to the rest of the program.

use crate::bot::TeamSpec;
use crate::error::LobbyError;
use crate::types::{Difficulty, GameMode, LobbyConfig, SpectatorPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientSettings,
    pub lobby: LobbySettings,
    pub service: ServiceSettings,
}

/// How to reach the local client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Process to read the port and token from
    pub process_name: String,
    /// Host the control API listens on
    pub host: String,
    /// Basic auth user name
    pub username: String,
    /// Fixed API port, skips discovery together with `auth_token`
    pub port: Option<u16>,
    /// Fixed auth token, skips discovery together with `port`
    pub auth_token: Option<String>,
}

/// Lobby to create and the bots to put in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LobbySettings {
    pub mode: GameMode,
    pub spectator_policy: SpectatorPolicy,
    pub lobby_name: String,
    pub password: String,
    /// Difficulty for bots that do not name one
    pub default_difficulty: Difficulty,
    /// Team specification, `"RED|BLUE"` or `"BLUE"`
    pub teams: String,
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Seed for random champion picks, random when unset
    pub random_seed: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            process_name: "LeagueClientUx.exe".to_string(),
            host: "127.0.0.1".to_string(),
            username: "riot".to_string(),
            port: None,
            auth_token: None,
        }
    }
}

impl Default for LobbySettings {
    fn default() -> Self {
        Self {
            mode: GameMode::PracticeTool,
            spectator_policy: SpectatorPolicy::NotAllowed,
            lobby_name: "lobby".to_string(),
            password: "delete yuumi".to_string(),
            default_difficulty: Difficulty::Medium,
            teams: "? ? ? ?|? ? ? ? ?".to_string(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            random_seed: None,
        }
    }
}

fn parse_env<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| config_error(format!("Invalid {} value: {} ({})", name, value, e)))
}

fn config_error(message: impl Into<String>) -> anyhow::Error {
    LobbyError::ConfigurationError {
        message: message.into(),
    }
    .into()
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// Values are only parsed here, call [`validate_config`] once every
    /// override has been applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Client settings
        if let Ok(name) = env::var("POROLOBBY_PROCESS_NAME") {
            config.client.process_name = name;
        }
        if let Ok(host) = env::var("POROLOBBY_HOST") {
            config.client.host = host;
        }
        if let Ok(port) = env::var("POROLOBBY_PORT") {
            config.client.port = Some(parse_env("POROLOBBY_PORT", &port)?);
        }
        if let Ok(token) = env::var("POROLOBBY_AUTH_TOKEN") {
            config.client.auth_token = Some(token);
        }

        // Lobby settings
        if let Ok(mode) = env::var("POROLOBBY_MODE") {
            config.lobby.mode = parse_env("POROLOBBY_MODE", &mode)?;
        }
        if let Ok(policy) = env::var("POROLOBBY_SPECTATOR_POLICY") {
            config.lobby.spectator_policy = parse_env("POROLOBBY_SPECTATOR_POLICY", &policy)?;
        }
        if let Ok(name) = env::var("POROLOBBY_LOBBY_NAME") {
            config.lobby.lobby_name = name;
        }
        if let Ok(password) = env::var("POROLOBBY_PASSWORD") {
            config.lobby.password = password;
        }
        if let Ok(difficulty) = env::var("POROLOBBY_DIFFICULTY") {
            config.lobby.default_difficulty = parse_env("POROLOBBY_DIFFICULTY", &difficulty)?;
        }
        if let Ok(teams) = env::var("POROLOBBY_TEAMS") {
            config.lobby.teams = teams;
        }

        // Service settings
        if let Ok(log_level) = env::var("POROLOBBY_LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(seed) = env::var("POROLOBBY_SEED") {
            config.service.random_seed = Some(parse_env("POROLOBBY_SEED", &seed)?);
        }

        Ok(config)
    }

    /// Load configuration from a TOML file, missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse configuration from TOML text, see [`AppConfig::from_env`]
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Invalid TOML configuration")?;
        Ok(config)
    }

    /// Lobby creation settings
    pub fn lobby_config(&self) -> LobbyConfig {
        LobbyConfig {
            game_mode: self.lobby.mode,
            spectator_policy: self.lobby.spectator_policy,
            lobby_name: self.lobby.lobby_name.clone(),
            password: self.lobby.password.clone(),
        }
    }

    /// Parsed team specification
    pub fn team_spec(&self) -> Result<TeamSpec> {
        Ok(self.lobby.teams.parse::<TeamSpec>()?)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => {
            return Err(config_error(format!(
                "Invalid log level: {}",
                config.service.log_level
            )))
        }
    }

    // Validate client settings
    if config.client.process_name.is_empty() {
        return Err(config_error("Client process name cannot be empty"));
    }
    if config.client.host.is_empty() {
        return Err(config_error("Client host cannot be empty"));
    }
    if config.client.username.is_empty() {
        return Err(config_error("Client username cannot be empty"));
    }
    if config.client.port == Some(0) {
        return Err(config_error("Client port cannot be 0"));
    }
    if config.client.port.is_some() != config.client.auth_token.is_some() {
        return Err(config_error(
            "Client port and auth token must be given together",
        ));
    }

    // Validate lobby settings
    if config.lobby.lobby_name.is_empty() {
        return Err(config_error("Lobby name cannot be empty"));
    }
    config
        .team_spec()?
        .slots(config.lobby.default_difficulty)
        .context("Invalid team specification")?;

    Ok(())
}
