//! Champion assignment for requested bot slots
//!
//! Explicitly named champions are reserved first, then every random slot gets
//! a distinct champion drawn from the remaining roster, so no champion appears
//! twice in one lobby.

use crate::bot::slot::{BotSlot, ChampionChoice, TeamSpec};
use crate::error::LobbyError;
use crate::types::{AddBotRequest, AvailableBot, ChampionId, Difficulty, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A bot slot with its final champion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBot {
    pub name: String,
    pub champion_id: ChampionId,
    pub difficulty: Difficulty,
    pub team: Team,
}

impl ResolvedBot {
    /// Request body that adds this bot to the lobby
    pub fn request(&self) -> AddBotRequest {
        AddBotRequest {
            bot_difficulty: self.difficulty,
            champion_id: self.champion_id,
            team_id: self.team,
        }
    }
}

/// Resolve raw red and blue tokens against the roster
///
/// Validates team sizes and difficulties before resolving, see
/// [`TeamSpec::slots`].
pub fn resolve_assignment<R: Rng + ?Sized>(
    bots_red: &[String],
    bots_blue: &[String],
    default_difficulty: Difficulty,
    available: &[AvailableBot],
    rng: &mut R,
) -> Result<Vec<ResolvedBot>, LobbyError> {
    let spec = TeamSpec::new(bots_red.iter().cloned(), bots_blue.iter().cloned());
    let slots = spec.slots(default_difficulty)?;
    resolve_slots(&slots, available, rng)
}

/// Resolve already parsed slots against the roster, keeping slot order
pub fn resolve_slots<R: Rng + ?Sized>(
    slots: &[BotSlot],
    available: &[AvailableBot],
    rng: &mut R,
) -> Result<Vec<ResolvedBot>, LobbyError> {
    let mut reserved: HashSet<&str> = HashSet::new();
    for slot in slots {
        if let ChampionChoice::Named(name) = &slot.champion {
            if !reserved.insert(name.as_str()) {
                return Err(LobbyError::invalid(format!(
                    "champion \"{name}\" requested more than once"
                )));
            }
        }
    }

    let needed = slots
        .iter()
        .filter(|slot| slot.champion == ChampionChoice::Random)
        .count();
    let mut random_picks = draw_random_champions(available, &reserved, needed, rng)?.into_iter();

    // First entry wins if the roster ever lists a name twice
    let mut ids: HashMap<&str, ChampionId> = HashMap::with_capacity(available.len());
    for bot in available {
        ids.entry(bot.name.as_str()).or_insert(bot.champion_id);
    }

    slots
        .iter()
        .map(|slot| -> Result<ResolvedBot, LobbyError> {
            let name = match &slot.champion {
                ChampionChoice::Named(name) => name.as_str(),
                ChampionChoice::Random => random_picks.next().ok_or_else(|| {
                    LobbyError::NotEnoughChampions {
                        needed,
                        available: 0,
                    }
                })?,
            };

            let champion_id = *ids
                .get(name)
                .ok_or_else(|| LobbyError::UnknownChampion {
                    name: name.to_string(),
                })?;

            Ok(ResolvedBot {
                name: name.to_string(),
                champion_id,
                difficulty: slot.difficulty,
                team: slot.team,
            })
        })
        .collect()
}

/// Draw `count` distinct champion names that are not reserved
fn draw_random_champions<'a, R: Rng + ?Sized>(
    available: &'a [AvailableBot],
    reserved: &HashSet<&str>,
    count: usize,
    rng: &mut R,
) -> Result<Vec<&'a str>, LobbyError> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let candidates: Vec<&str> = available
        .iter()
        .map(|bot| bot.name.as_str())
        .filter(|name| !reserved.contains(name) && seen.insert(*name))
        .collect();

    if candidates.len() < count {
        return Err(LobbyError::NotEnoughChampions {
            needed: count,
            available: candidates.len(),
        });
    }

    let picks: Vec<&str> = candidates.choose_multiple(rng, count).copied().collect();
    debug!("Picked random champions: {:?}", picks);
    Ok(picks)
}
