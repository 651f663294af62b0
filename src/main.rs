//! Main entry point for the Poro Lobby tool
//!
//! Parses the command line, resolves the configuration, finds the running
//! client, and performs one lobby run.

use anyhow::Result;
use clap::Parser;
use poro_lobby::client::{resolve_credentials, HttpControlApi};
use poro_lobby::config::{validate_config, AppConfig};
use poro_lobby::types::{Difficulty, GameMode, SpectatorPolicy};
use poro_lobby::LobbyOrchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const USAGE_DETAILS: &str = r#"USAGE:
   TEAMS      = "TEAM|TEAM"           Set red and blue teams.
              = "TEAM"                Set blue team only.
   TEAM       = "BOT BOT BOT BOT BOT" Set team's bots (0 to 4 for red, 0 to 5 for blue).
   BOT        = "CHAMPION:DIFFICULTY" Set a champion at the given difficulty.
              = "CHAMPION"            Set a champion at the default difficulty.
   CHAMPION   = "?"                   Set a random champion.
              = "Alistar"             Set a specific champion.
                Available champions: https://leagueoflegends.fandom.com/wiki/Bots#Available_Bots
   DIFFICULTY = "EASY" "MEDIUM"
   POLICY     = "AllAllowed" "NotAllowed"
   MODE       = "CLASSIC" (or "CUSTOM") "PRACTICETOOL"

EXAMPLES:
  Full random teams:
  poro-lobby "? ? ? ?|? ? ? ? ?"

  Alistar on your team, 2 randoms on the other:
  poro-lobby "Alistar|? ?"

  1v1 against Brand:
  poro-lobby "Brand"

  Own champs easy, opposing champs medium difficulty:
  poro-lobby "?:EASY ?:EASY ?:EASY ?:EASY|? ? ? ? ?""#;

/// Poro Lobby - custom game or practice tool lobby with bots
#[derive(Parser)]
#[command(
    name = "poro-lobby",
    version,
    about = "A tool to create a custom game or practice tool lobby with multiple bots",
    long_about = "A tool to create a custom game or practice tool lobby with multiple bots. \
                  Bots on each team can be chosen randomly or by name at a given difficulty each.",
    after_help = USAGE_DETAILS
)]
struct Args {
    /// Bots for both teams
    #[arg(value_name = "TEAMS")]
    teams: Option<String>,

    /// Spectator policy
    #[arg(short, long, value_name = "POLICY")]
    spectator_policy: Option<SpectatorPolicy>,

    /// Lobby password, empty when given without a value
    #[arg(short, long, value_name = "PASSWORD", num_args = 0..=1, default_missing_value = "")]
    password: Option<String>,

    /// Game mode
    #[arg(short, long, value_name = "MODE")]
    mode: Option<GameMode>,

    /// Lobby name
    #[arg(short, long, value_name = "LOBBYNAME")]
    lobby_name: Option<String>,

    /// Difficulty for bots that do not name one
    #[arg(short, long, value_name = "DIFFICULTY")]
    difficulty: Option<Difficulty>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Control API port, skips process discovery together with --token
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,

    /// Control API auth token, skips process discovery together with --port
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Seed for random champion picks
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Log level override
    #[arg(
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and print the planned bots without contacting the client"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    merge_config(config, args)
}

/// Apply CLI overrides on top of loaded settings, then validate the result
fn merge_config(mut config: AppConfig, args: &Args) -> Result<AppConfig> {
    if let Some(teams) = &args.teams {
        config.lobby.teams = teams.clone();
    }
    if let Some(policy) = args.spectator_policy {
        config.lobby.spectator_policy = policy;
    }
    if let Some(password) = &args.password {
        config.lobby.password = password.clone();
    }
    if let Some(mode) = args.mode {
        config.lobby.mode = mode;
    }
    if let Some(lobby_name) = &args.lobby_name {
        config.lobby.lobby_name = lobby_name.clone();
    }
    if let Some(difficulty) = args.difficulty {
        config.lobby.default_difficulty = difficulty;
    }
    if let Some(port) = args.port {
        config.client.port = Some(port);
    }
    if let Some(token) = &args.token {
        config.client.auth_token = Some(token.clone());
    }
    if let Some(seed) = args.seed {
        config.service.random_seed = Some(seed);
    }
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    validate_config(&config)?;
    Ok(config)
}

/// Print the bots a run would request
fn display_plan(config: &AppConfig) -> Result<()> {
    let slots = config
        .team_spec()?
        .slots(config.lobby.default_difficulty)?;

    println!(
        "Lobby '{}' ({}, spectators: {})",
        config.lobby.lobby_name, config.lobby.mode, config.lobby.spectator_policy
    );
    for slot in &slots {
        println!("  team {}: {} {}", slot.team, slot.champion, slot.difficulty);
    }
    Ok(())
}

async fn run(config: &AppConfig) -> Result<()> {
    let teams = config.team_spec()?;
    let credentials = resolve_credentials(&config.client)?;
    let api = HttpControlApi::for_local_client(&config.client, &credentials)?;

    let orchestrator = LobbyOrchestrator::from_config(Arc::new(api), config);
    let summary = orchestrator.run(&teams).await?;

    for bot in &summary.bots {
        println!("team {}: {} {}", bot.team, bot.name, bot.difficulty);
    }
    info!("Lobby ready with {} bots", summary.bots.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        display_plan(&config)?;
        info!("Dry run completed - no requests sent");
        return Ok(());
    }

    if let Err(e) = run(&config).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_teams_replace_invalid_loaded_teams() {
        let mut loaded = AppConfig::default();
        loaded.lobby.teams = "? ? ? ? ?|".to_string();
        assert!(validate_config(&loaded).is_err());

        let args = Args::parse_from(["poro-lobby", "Brand"]);
        let config = merge_config(loaded, &args).unwrap();
        assert_eq!(config.lobby.teams, "Brand");
    }

    #[test]
    fn test_cli_log_level_replaces_invalid_loaded_level() {
        let mut loaded = AppConfig::default();
        loaded.service.log_level = "loud".to_string();

        let args = Args::parse_from(["poro-lobby", "--log-level", "warn"]);
        let config = merge_config(loaded.clone(), &args).unwrap();
        assert_eq!(config.service.log_level, "warn");

        let args = Args::parse_from(["poro-lobby", "--debug"]);
        assert_eq!(merge_config(loaded, &args).unwrap().service.log_level, "debug");
    }

    #[test]
    fn test_merged_config_is_still_validated() {
        let args = Args::parse_from(["poro-lobby", "? ? ? ? ?|"]);
        assert!(merge_config(AppConfig::default(), &args).is_err());

        let args = Args::parse_from(["poro-lobby", "--port", "2999"]);
        assert!(merge_config(AppConfig::default(), &args).is_err());
    }

    #[test]
    fn test_empty_password_flag() {
        let args = Args::parse_from(["poro-lobby", "-p"]);
        let config = merge_config(AppConfig::default(), &args).unwrap();
        assert_eq!(config.lobby.password, "");
    }
}
