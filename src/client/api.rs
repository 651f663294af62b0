//! Control API client
//!
//! [`ControlApi`] is the seam between lobby orchestration and the client's
//! HTTP interface; [`HttpControlApi`] is the real implementation.

use crate::client::discovery::ClientCredentials;
use crate::config::ClientSettings;
use crate::error::{LobbyError, Result};
use crate::types::{AddBotRequest, AvailableBot, CreateLobbyRequest, CreatedLobby, LobbyConfig};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

pub const LOBBY_PATH: &str = "/lol-lobby/v2/lobby";
pub const AVAILABLE_BOTS_PATH: &str = "/lol-lobby/v2/lobby/custom/available-bots";
pub const ADD_BOT_PATH: &str = "/lol-lobby/v1/lobby/custom/bots";

/// Operations the lobby tool needs from the client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ControlApi: Send + Sync {
    /// Create a custom lobby, replacing the current one
    async fn create_lobby(&self, config: &LobbyConfig) -> Result<CreatedLobby>;

    /// Fetch the champions that can be played by bots
    async fn get_available_bots(&self) -> Result<Vec<AvailableBot>>;

    /// Add one bot to the current lobby
    async fn add_bot(&self, request: &AddBotRequest) -> Result<()>;
}

/// HTTP implementation over a single authenticated reqwest client
pub struct HttpControlApi {
    client: reqwest::Client,
    base_url: String,
    username: String,
    token: String,
}

impl HttpControlApi {
    /// Create a client for an arbitrary base URL
    ///
    /// Certificate validation is disabled: the local client serves a
    /// self-signed certificate.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            token: token.into(),
        })
    }

    /// Create a client for the locally running game client
    pub fn for_local_client(
        settings: &ClientSettings,
        credentials: &ClientCredentials,
    ) -> Result<Self> {
        Self::new(
            format!("https://{}:{}", settings.host, credentials.port),
            settings.username.clone(),
            credentials.token.clone(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        debug!("{} {}", method, path);
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .basic_auth(&self.username, Some(&self.token))
    }
}

#[async_trait]
impl ControlApi for HttpControlApi {
    async fn create_lobby(&self, config: &LobbyConfig) -> Result<CreatedLobby> {
        let response = self
            .request(reqwest::Method::POST, LOBBY_PATH)
            .json(&CreateLobbyRequest::from(config))
            .send()
            .await
            .context("Failed to send lobby creation request")?;

        if response.status() != StatusCode::OK {
            return Err(LobbyError::LobbyCreationFailed {
                status: response.status().as_u16(),
            }
            .into());
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .context("Failed to decode created lobby")?;

        Ok(CreatedLobby { body })
    }

    async fn get_available_bots(&self) -> Result<Vec<AvailableBot>> {
        let response = self
            .request(reqwest::Method::GET, AVAILABLE_BOTS_PATH)
            .send()
            .await
            .context("Failed to send available bots request")?;

        if response.status() != StatusCode::OK {
            return Err(LobbyError::BotRosterFetchFailed {
                status: response.status().as_u16(),
            }
            .into());
        }

        response
            .json::<Vec<AvailableBot>>()
            .await
            .context("Failed to decode available bots")
    }

    async fn add_bot(&self, request: &AddBotRequest) -> Result<()> {
        let response = self
            .request(reqwest::Method::POST, ADD_BOT_PATH)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to send add bot request for champion {}", request.champion_id))?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(LobbyError::AddBotFailed {
                champion_id: request.champion_id,
                team: request.team_id.to_string(),
                difficulty: request.bot_difficulty.to_string(),
                status: response.status().as_u16(),
            }
            .into());
        }

        Ok(())
    }
}
