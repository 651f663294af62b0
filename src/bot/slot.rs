//! Team specification parsing
//!
//! A team specification looks like `"RED|BLUE"` or just `"BLUE"`, where each
//! side is a space separated list of `CHAMPION` or `CHAMPION:DIFFICULTY`
//! tokens and `?` stands for a random champion.

use crate::error::LobbyError;
use crate::types::{Difficulty, Team};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token standing for a random champion
pub const RANDOM_CHAMPION: &str = "?";

/// Champion requested for a slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChampionChoice {
    Random,
    Named(String),
}

impl fmt::Display for ChampionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChampionChoice::Random => f.write_str(RANDOM_CHAMPION),
            ChampionChoice::Named(name) => f.write_str(name),
        }
    }
}

/// One bot to add, before random champions are resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSlot {
    pub champion: ChampionChoice,
    pub difficulty: Difficulty,
    pub team: Team,
}

impl BotSlot {
    /// Parse a `CHAMPION` or `CHAMPION:DIFFICULTY` token
    pub fn parse(token: &str, team: Team, default_difficulty: Difficulty) -> Result<Self, LobbyError> {
        let (champion, difficulty) = match token.split_once(':') {
            Some((champion, "")) => (champion, default_difficulty),
            Some((champion, difficulty)) => (champion, difficulty.parse::<Difficulty>()?),
            None => (token, default_difficulty),
        };

        let champion = match champion {
            "" => {
                return Err(LobbyError::invalid(format!(
                    "bot \"{token}\" has no champion"
                )))
            }
            RANDOM_CHAMPION => ChampionChoice::Random,
            name => ChampionChoice::Named(name.to_string()),
        };

        Ok(Self {
            champion,
            difficulty,
            team,
        })
    }
}

/// Raw bot tokens for both teams, as given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamSpec {
    pub red: Vec<String>,
    pub blue: Vec<String>,
}

impl TeamSpec {
    pub fn new<S: Into<String>>(
        red: impl IntoIterator<Item = S>,
        blue: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            red: red.into_iter().map(Into::into).collect(),
            blue: blue.into_iter().map(Into::into).collect(),
        }
    }

    /// Total number of bots requested
    pub fn len(&self) -> usize {
        self.red.len() + self.blue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate team sizes and parse every token, red team first
    pub fn slots(&self, default_difficulty: Difficulty) -> Result<Vec<BotSlot>, LobbyError> {
        let mut slots = Vec::with_capacity(self.len());

        for (team, tokens) in [(Team::Red, &self.red), (Team::Blue, &self.blue)] {
            if tokens.len() > team.max_bots() {
                return Err(LobbyError::invalid(format!(
                    "bot_count_{}={}, at most {} allowed",
                    team_label(team),
                    tokens.len(),
                    team.max_bots()
                )));
            }

            for token in tokens {
                slots.push(BotSlot::parse(token, team, default_difficulty)?);
            }
        }

        Ok(slots)
    }
}

fn team_label(team: Team) -> &'static str {
    match team {
        Team::Red => "red",
        Team::Blue => "blue",
    }
}

impl FromStr for TeamSpec {
    type Err = LobbyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A single team is the opposing (blue) side
        Ok(match s.split_once('|') {
            Some((red, blue)) => TeamSpec::new(red.split_whitespace(), blue.split_whitespace()),
            None => TeamSpec::new(Vec::<&str>::new(), s.split_whitespace()),
        })
    }
}

impl fmt::Display for TeamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.red.join(" "), self.blue.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_with_difficulty() {
        let slot = BotSlot::parse("Brand:EASY", Team::Blue, Difficulty::Medium).unwrap();
        assert_eq!(slot.champion, ChampionChoice::Named("Brand".to_string()));
        assert_eq!(slot.difficulty, Difficulty::Easy);
        assert_eq!(slot.team, Team::Blue);
    }

    #[test]
    fn test_parse_token_default_difficulty() {
        let slot = BotSlot::parse("Brand", Team::Red, Difficulty::Medium).unwrap();
        assert_eq!(slot.champion, ChampionChoice::Named("Brand".to_string()));
        assert_eq!(slot.difficulty, Difficulty::Medium);

        // Trailing colon falls back to the default too
        let slot = BotSlot::parse("Brand:", Team::Red, Difficulty::Easy).unwrap();
        assert_eq!(slot.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_parse_random_token() {
        let slot = BotSlot::parse("?:EASY", Team::Red, Difficulty::Medium).unwrap();
        assert_eq!(slot.champion, ChampionChoice::Random);
        assert_eq!(slot.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_parse_invalid_tokens() {
        assert!(matches!(
            BotSlot::parse("Brand:HARD", Team::Red, Difficulty::Medium),
            Err(LobbyError::InvalidArgument { .. })
        ));
        assert!(matches!(
            BotSlot::parse(":EASY", Team::Red, Difficulty::Medium),
            Err(LobbyError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_team_spec_two_teams() {
        let spec: TeamSpec = "Alistar|? ?".parse().unwrap();
        assert_eq!(spec.red, vec!["Alistar"]);
        assert_eq!(spec.blue, vec!["?", "?"]);
        assert_eq!(spec.len(), 3);
    }

    #[test]
    fn test_team_spec_single_team_is_blue() {
        let spec: TeamSpec = "Brand".parse().unwrap();
        assert!(spec.red.is_empty());
        assert_eq!(spec.blue, vec!["Brand"]);
    }

    #[test]
    fn test_team_spec_splits_on_first_bar_only() {
        let spec: TeamSpec = " ? |?  Annie ".parse().unwrap();
        assert_eq!(spec.red, vec!["?"]);
        assert_eq!(spec.blue, vec!["?", "Annie"]);

        let empty: TeamSpec = "".parse().unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_slots_order_and_teams() {
        let spec: TeamSpec = "?:EASY Alistar|Brand".parse().unwrap();
        let slots = spec.slots(Difficulty::Medium).unwrap();

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].team, Team::Red);
        assert_eq!(slots[0].difficulty, Difficulty::Easy);
        assert_eq!(slots[1].champion, ChampionChoice::Named("Alistar".to_string()));
        assert_eq!(slots[1].difficulty, Difficulty::Medium);
        assert_eq!(slots[2].team, Team::Blue);
    }

    #[test]
    fn test_slots_team_size_limits() {
        let full: TeamSpec = "? ? ? ?|? ? ? ? ?".parse().unwrap();
        assert_eq!(full.slots(Difficulty::Medium).unwrap().len(), 9);

        let red_overflow: TeamSpec = "? ? ? ? ?|".parse().unwrap();
        let err = red_overflow.slots(Difficulty::Medium).unwrap_err();
        assert!(err.to_string().contains("bot_count_red=5"));

        let blue_overflow: TeamSpec = "? ? ? ? ? ?".parse().unwrap();
        assert!(matches!(
            blue_overflow.slots(Difficulty::Medium),
            Err(LobbyError::InvalidArgument { .. })
        ));
    }
}
