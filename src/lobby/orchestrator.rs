//! Lobby orchestration
//!
//! This module drives a single run: create the lobby and fetch the bot roster
//! side by side, resolve champions for every requested slot, then add all
//! bots concurrently.

use crate::bot::{resolve_assignment, resolve_slots, BotSlot, ResolvedBot, TeamSpec};
use crate::client::ControlApi;
use crate::config::AppConfig;
use crate::error::Result;
use crate::types::{AddBotRequest, AvailableBot, ChampionId, CreatedLobby, Difficulty, LobbyConfig, Team};
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Stage of a run, never revisited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    LobbyAndRosterRequested,
    AssignmentResolved,
    BotsAdding,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Start => write!(f, "Start"),
            RunState::LobbyAndRosterRequested => write!(f, "LobbyAndRosterRequested"),
            RunState::AssignmentResolved => write!(f, "AssignmentResolved"),
            RunState::BotsAdding => write!(f, "BotsAdding"),
            RunState::Done => write!(f, "Done"),
            RunState::Failed => write!(f, "Failed"),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub lobby: CreatedLobby,
    pub bots: Vec<ResolvedBot>,
}

fn log_resolved(resolved: &[ResolvedBot]) {
    for bot in resolved {
        debug!(
            "Slot resolved - champion: '{}' ({}), team: {}, difficulty: {}",
            bot.name, bot.champion_id, bot.team, bot.difficulty
        );
    }
}

/// Creates a lobby and fills it with bots through a [`ControlApi`]
pub struct LobbyOrchestrator {
    api: Arc<dyn ControlApi>,
    lobby: LobbyConfig,
    default_difficulty: Difficulty,
    random_seed: Option<u64>,
}

impl LobbyOrchestrator {
    /// Create a new orchestrator
    pub fn new(api: Arc<dyn ControlApi>, lobby: LobbyConfig, default_difficulty: Difficulty) -> Self {
        Self {
            api,
            lobby,
            default_difficulty,
            random_seed: None,
        }
    }

    /// Create an orchestrator from the application configuration
    pub fn from_config(api: Arc<dyn ControlApi>, config: &AppConfig) -> Self {
        Self::new(api, config.lobby_config(), config.lobby.default_difficulty)
            .with_seed(config.service.random_seed)
    }

    /// Use a fixed seed for random champion picks
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn lobby_config(&self) -> &LobbyConfig {
        &self.lobby
    }

    fn rng(&self) -> StdRng {
        match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Create the configured lobby
    pub async fn create_lobby(&self) -> Result<CreatedLobby> {
        info!(
            "Creating {} lobby '{}' (spectators: {})",
            self.lobby.game_mode, self.lobby.lobby_name, self.lobby.spectator_policy
        );
        let lobby = self.api.create_lobby(&self.lobby).await?;
        debug!("Lobby created: {:?}", lobby.party_id());
        Ok(lobby)
    }

    /// Fetch the bot roster
    pub async fn get_available_bots(&self) -> Result<Vec<AvailableBot>> {
        let bots = self.api.get_available_bots().await?;
        info!("Client offers {} bot champions", bots.len());
        Ok(bots)
    }

    /// Add a single bot
    pub async fn add_bot(&self, champion_id: ChampionId, team: Team, difficulty: Difficulty) -> Result<()> {
        let request = AddBotRequest {
            bot_difficulty: difficulty,
            champion_id,
            team_id: team,
        };
        self.api.add_bot(&request).await
    }

    /// Resolve raw red and blue tokens against `available` and add every bot
    ///
    /// Team sizes and tokens are validated before any request is sent.
    pub async fn add_bots(
        &self,
        bots_red: &[String],
        bots_blue: &[String],
        available: &[AvailableBot],
    ) -> Result<Vec<ResolvedBot>> {
        let resolved = resolve_assignment(
            bots_red,
            bots_blue,
            self.default_difficulty,
            available,
            &mut self.rng(),
        )?;
        log_resolved(&resolved);
        self.dispatch(&resolved).await?;
        Ok(resolved)
    }

    fn resolve(&self, slots: &[BotSlot], available: &[AvailableBot]) -> Result<Vec<ResolvedBot>> {
        let resolved = resolve_slots(slots, available, &mut self.rng())?;
        log_resolved(&resolved);
        Ok(resolved)
    }

    /// Send all add bot requests at once and wait for every one to settle
    async fn dispatch(&self, resolved: &[ResolvedBot]) -> Result<()> {
        let requests: Vec<AddBotRequest> = resolved.iter().map(ResolvedBot::request).collect();
        let results = join_all(requests.iter().map(|request| self.api.add_bot(request))).await;

        let mut first_error = None;
        for (bot, result) in resolved.iter().zip(results) {
            match result {
                Ok(()) => info!("Added {} to team {} ({})", bot.name, bot.team, bot.difficulty),
                Err(e) => {
                    warn!("Failed to add {}: {}", bot.name, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn advance(&self, state: &mut RunState, next: RunState) {
        info!("Run state: {} -> {}", state, next);
        *state = next;
    }

    /// Perform a complete run for `teams`
    pub async fn run(&self, teams: &TeamSpec) -> Result<RunSummary> {
        let mut state = RunState::Start;

        match self.run_from(&mut state, teams).await {
            Ok(summary) => {
                self.advance(&mut state, RunState::Done);
                Ok(summary)
            }
            Err(e) => {
                error!("Run failed during {}: {}", state, e);
                self.advance(&mut state, RunState::Failed);
                Err(e)
            }
        }
    }

    async fn run_from(&self, state: &mut RunState, teams: &TeamSpec) -> Result<RunSummary> {
        // Reject a bad team spec before touching the network
        let slots = teams.slots(self.default_difficulty)?;

        self.advance(state, RunState::LobbyAndRosterRequested);
        let (lobby, available) = tokio::join!(self.create_lobby(), self.get_available_bots());
        let lobby = lobby?;
        let available = available?;

        let bots = self.resolve(&slots, &available)?;
        self.advance(state, RunState::AssignmentResolved);

        self.advance(state, RunState::BotsAdding);
        self.dispatch(&bots).await?;

        Ok(RunSummary { lobby, bots })
    }
}
