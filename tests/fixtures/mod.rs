//! Test fixtures: an in-process control API and a mock HTTP control server

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use poro_lobby::client::api::{ADD_BOT_PATH, AVAILABLE_BOTS_PATH, LOBBY_PATH};
use poro_lobby::error::{LobbyError, Result};
use poro_lobby::types::{AddBotRequest, AvailableBot, ChampionId, CreatedLobby, LobbyConfig};
use poro_lobby::ControlApi;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Roster with more than enough champions for a full lobby
pub fn test_roster() -> Vec<AvailableBot> {
    [
        ("Alistar", 12),
        ("Annie", 1),
        ("Ashe", 22),
        ("Brand", 63),
        ("Caitlyn", 51),
        ("Darius", 122),
        ("Garen", 86),
        ("Lux", 99),
        ("Malphite", 54),
        ("Ryze", 13),
        ("Sona", 37),
        ("Teemo", 17),
    ]
    .into_iter()
    .map(|(name, id)| AvailableBot::new(name, id))
    .collect()
}

/// Calls observed by [`RecordingControlApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    CreateLobby(LobbyConfig),
    GetAvailableBots,
    AddBot(AddBotRequest),
}

/// Requests currently in flight and the most seen at once
#[derive(Debug, Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    /// Count a request as in flight for `delay`
    pub async fn hold(&self, delay: Duration) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(delay).await;
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

const RESPONSE_DELAY: Duration = Duration::from_millis(5);

/// Control API that records calls and fails on demand
#[derive(Debug, Default)]
pub struct RecordingControlApi {
    calls: Mutex<Vec<ApiCall>>,
    roster: Vec<AvailableBot>,
    lobby_failure: Option<u16>,
    failing_champions: HashSet<ChampionId>,
    setup_in_flight: InFlight,
    bots_in_flight: InFlight,
}

impl RecordingControlApi {
    pub fn new(roster: Vec<AvailableBot>) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    /// Make lobby creation answer with `status`
    pub fn failing_lobby(mut self, status: u16) -> Self {
        self.lobby_failure = Some(status);
        self
    }

    /// Make adding a bot with `champion_id` fail
    pub fn failing_champion(mut self, champion_id: ChampionId) -> Self {
        self.failing_champions.insert(champion_id);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn added_bots(&self) -> Vec<AddBotRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::AddBot(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Most lobby and roster requests answered at the same time
    pub fn peak_setup_requests(&self) -> usize {
        self.setup_in_flight.peak()
    }

    /// Most add bot requests answered at the same time
    pub fn peak_bot_requests(&self) -> usize {
        self.bots_in_flight.peak()
    }

    fn record(&self, call: ApiCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl ControlApi for RecordingControlApi {
    async fn create_lobby(&self, config: &LobbyConfig) -> Result<CreatedLobby> {
        self.record(ApiCall::CreateLobby(config.clone()));
        self.setup_in_flight.hold(RESPONSE_DELAY).await;
        if let Some(status) = self.lobby_failure {
            return Err(LobbyError::LobbyCreationFailed { status }.into());
        }
        Ok(CreatedLobby {
            body: json!({ "partyId": "test-party" }),
        })
    }

    async fn get_available_bots(&self) -> Result<Vec<AvailableBot>> {
        self.record(ApiCall::GetAvailableBots);
        self.setup_in_flight.hold(RESPONSE_DELAY).await;
        Ok(self.roster.clone())
    }

    async fn add_bot(&self, request: &AddBotRequest) -> Result<()> {
        self.record(ApiCall::AddBot(*request));
        self.bots_in_flight.hold(RESPONSE_DELAY).await;

        if self.failing_champions.contains(&request.champion_id) {
            return Err(LobbyError::AddBotFailed {
                champion_id: request.champion_id,
                team: request.team_id.to_string(),
                difficulty: request.bot_difficulty.to_string(),
                status: 500,
            }
            .into());
        }
        Ok(())
    }
}

/// Shared state of the mock HTTP control server
#[derive(Debug, Default)]
pub struct MockServerState {
    pub lobby_status: Option<StatusCode>,
    pub roster_status: Option<StatusCode>,
    pub failing_champion: Option<ChampionId>,
    pub roster: Vec<AvailableBot>,
    pub lobby_bodies: Mutex<Vec<Value>>,
    pub bot_bodies: Mutex<Vec<Value>>,
    pub authorization: Mutex<Vec<String>>,
}

impl MockServerState {
    pub fn new(roster: Vec<AvailableBot>) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    fn record_auth(&self, headers: &HeaderMap) {
        if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
            if let Ok(mut auth) = self.authorization.lock() {
                auth.push(value.to_string());
            }
        }
    }
}

async fn create_lobby_handler(
    State(state): State<Arc<MockServerState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record_auth(&headers);
    if let Ok(mut bodies) = state.lobby_bodies.lock() {
        bodies.push(body);
    }

    match state.lobby_status {
        Some(status) => (status, Json(json!({ "message": "rejected" }))).into_response(),
        None => (StatusCode::OK, Json(json!({ "partyId": "mock-party" }))).into_response(),
    }
}

async fn available_bots_handler(
    State(state): State<Arc<MockServerState>>,
    headers: HeaderMap,
) -> Response {
    state.record_auth(&headers);
    match state.roster_status {
        Some(status) => status.into_response(),
        None => {
            let roster: Vec<Value> = state
                .roster
                .iter()
                .map(|bot| json!({ "name": bot.name, "id": bot.champion_id, "active": true }))
                .collect();
            (StatusCode::OK, Json(Value::Array(roster))).into_response()
        }
    }
}

async fn add_bot_handler(
    State(state): State<Arc<MockServerState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record_auth(&headers);
    let champion_id = body.get("championId").and_then(Value::as_i64);
    if let Ok(mut bodies) = state.bot_bodies.lock() {
        bodies.push(body);
    }

    if champion_id.is_some() && champion_id == state.failing_champion {
        return StatusCode::BAD_REQUEST.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Serve the mock control API on an ephemeral local port
pub async fn spawn_mock_server(state: Arc<MockServerState>) -> SocketAddr {
    let app = Router::new()
        .route(LOBBY_PATH, post(create_lobby_handler))
        .route(AVAILABLE_BOTS_PATH, get(available_bots_handler))
        .route(ADD_BOT_PATH, post(add_bot_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Mock server has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server failed");
    });

    addr
}
