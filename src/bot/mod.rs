//! Bot slot parsing and champion assignment
//!
//! This module turns the team specification into concrete bots with distinct
//! champions, ready to be added to the lobby.

pub mod assignment;
pub mod slot;

pub use assignment::{resolve_assignment, resolve_slots, ResolvedBot};
pub use slot::{BotSlot, ChampionChoice, TeamSpec, RANDOM_CHAMPION};
