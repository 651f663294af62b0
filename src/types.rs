//! Common types used throughout the lobby tool

use crate::error::LobbyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric champion identifier in the client's roster
pub type ChampionId = i64;

/// Game mode of the created lobby
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "PRACTICETOOL")]
    PracticeTool,
    #[serde(rename = "CLASSIC", alias = "CUSTOM")]
    Classic,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::PracticeTool => "PRACTICETOOL",
            GameMode::Classic => "CLASSIC",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = LobbyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRACTICETOOL" => Ok(GameMode::PracticeTool),
            // The regular custom game is called CLASSIC by the client
            "CLASSIC" | "CUSTOM" => Ok(GameMode::Classic),
            other => Err(LobbyError::invalid(format!(
                "game_mode={other}, expected \"PRACTICETOOL\" or \"CLASSIC\""
            ))),
        }
    }
}

/// Who may spectate the lobby
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectatorPolicy {
    AllAllowed,
    NotAllowed,
}

impl SpectatorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpectatorPolicy::AllAllowed => "AllAllowed",
            SpectatorPolicy::NotAllowed => "NotAllowed",
        }
    }
}

impl fmt::Display for SpectatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpectatorPolicy {
    type Err = LobbyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AllAllowed" => Ok(SpectatorPolicy::AllAllowed),
            "NotAllowed" => Ok(SpectatorPolicy::NotAllowed),
            other => Err(LobbyError::invalid(format!(
                "spectator_policy={other}, expected \"AllAllowed\" or \"NotAllowed\""
            ))),
        }
    }
}

/// Bot difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = LobbyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            other => Err(LobbyError::invalid(format!(
                "difficulty={other}, expected \"EASY\" or \"MEDIUM\""
            ))),
        }
    }
}

/// Side of the lobby a bot is placed on
///
/// Red is the side the local player sits on, so it only has room for four bots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "100")]
    Red,
    #[serde(rename = "200")]
    Blue,
}

impl Team {
    /// Team id used by the control API
    pub fn id(&self) -> u16 {
        match self {
            Team::Red => 100,
            Team::Blue => 200,
        }
    }

    /// Maximum number of bots the team accepts
    pub fn max_bots(&self) -> usize {
        match self {
            Team::Red => 4,
            Team::Blue => 5,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl TryFrom<u16> for Team {
    type Error = LobbyError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        match id {
            100 => Ok(Team::Red),
            200 => Ok(Team::Blue),
            other => Err(LobbyError::invalid(format!(
                "team_id={other}, expected 100 or 200"
            ))),
        }
    }
}

/// Settings of the lobby to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyConfig {
    pub game_mode: GameMode,
    pub spectator_policy: SpectatorPolicy,
    pub lobby_name: String,
    pub password: String,
}

/// A bot champion offered by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableBot {
    pub name: String,
    #[serde(rename = "id")]
    pub champion_id: ChampionId,
}

impl AvailableBot {
    pub fn new(name: impl Into<String>, champion_id: ChampionId) -> Self {
        Self {
            name: name.into(),
            champion_id,
        }
    }
}

/// Response body of a successful lobby creation
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedLobby {
    pub body: serde_json::Value,
}

impl CreatedLobby {
    /// Party id assigned by the client, if it reported one
    pub fn party_id(&self) -> Option<&str> {
        self.body.get("partyId").and_then(|v| v.as_str())
    }
}

/// Wire Message Types
/// Body of `POST /lol-lobby/v2/lobby`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLobbyRequest {
    pub is_custom: bool,
    pub custom_game_lobby: CustomGameLobby,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomGameLobby {
    pub configuration: LobbyConfiguration,
    pub lobby_name: String,
    pub lobby_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyConfiguration {
    pub game_mode: GameMode,
    pub map_id: u32,
    pub mutators: Mutators,
    pub spectator_policy: SpectatorPolicy,
    pub team_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mutators {
    pub id: u32,
}

/// Summoner's Rift
pub const MAP_ID: u32 = 11;
/// Blind pick
pub const MUTATOR_ID: u32 = 1;
pub const TEAM_SIZE: u32 = 5;

impl From<&LobbyConfig> for CreateLobbyRequest {
    fn from(config: &LobbyConfig) -> Self {
        Self {
            is_custom: true,
            custom_game_lobby: CustomGameLobby {
                configuration: LobbyConfiguration {
                    game_mode: config.game_mode,
                    map_id: MAP_ID,
                    mutators: Mutators { id: MUTATOR_ID },
                    spectator_policy: config.spectator_policy,
                    team_size: TEAM_SIZE,
                },
                lobby_name: config.lobby_name.clone(),
                lobby_password: config.password.clone(),
            },
        }
    }
}

/// Body of `POST /lol-lobby/v1/lobby/custom/bots`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBotRequest {
    pub bot_difficulty: Difficulty,
    pub champion_id: ChampionId,
    pub team_id: Team,
}
