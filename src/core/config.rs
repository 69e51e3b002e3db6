//! Session configuration.
//!
//! A configuration step produces one [`SessionConfig`] which fully
//! determines a round:
//! - the ordered player roster
//! - how many distinct faces are in play (`pair_count`)
//! - the [`Difficulty`], i.e. how many cards make a set
//! - whether a joker is dealt and whether seat order is randomized
//!
//! Validation happens here, before a round can start. The engine
//! assumes every `SessionConfig` it receives is valid.
//!
//! The configuration screen hands the record over as JSON
//! ([`ConfigHandoff`]); [`SessionConfig::from_json`] parses and validates it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest players a round can start with.
pub const MIN_PLAYERS: usize = 2;

/// Most players a round can seat.
pub const MAX_PLAYERS: usize = 10;

/// Pair counts offered by the configuration screen.
pub const PAIR_COUNT_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Number of distinct card-face assets available (50 pairs plus a joker face).
pub const CARD_FACE_COUNT: usize = 51;

/// How many matching cards complete a set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Pairs.
    #[default]
    Normal,
    /// Triples.
    Hard,
}

impl Difficulty {
    /// Map the configuration screen's hard-mode checkbox.
    #[must_use]
    pub const fn from_hard_mode(hard: bool) -> Self {
        if hard {
            Difficulty::Hard
        } else {
            Difficulty::Normal
        }
    }

    /// Cards required to complete a set.
    #[must_use]
    pub const fn duplicates_per_set(self) -> usize {
        match self {
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

/// Reasons a configuration is rejected before a round starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least {min} players are required, got {count}", min = MIN_PLAYERS)]
    TooFewPlayers { count: usize },

    #[error("at most {max} players are supported, got {count}", max = MAX_PLAYERS)]
    TooManyPlayers { count: usize },

    #[error("player {} has a blank name", .index + 1)]
    BlankPlayerName { index: usize },

    #[error("pair count must be at least 1, got {pair_count}")]
    InvalidPairCount { pair_count: usize },

    #[error("{needed} card faces needed but only {available} are available")]
    NotEnoughFaces { needed: usize, available: usize },

    #[error("malformed configuration record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Validated, immutable parameters for a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    players: Vec<String>,
    pair_count: usize,
    difficulty: Difficulty,
    joker_included: bool,
    randomize_player_order: bool,
}

impl SessionConfig {
    /// Start building a configuration for the given roster.
    pub fn builder<I, S>(players: I) -> SessionConfigBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SessionConfigBuilder::new(players)
    }

    /// Parse and validate a JSON handoff record.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let handoff: ConfigHandoff = serde_json::from_str(json)?;
        Self::try_from(handoff)
    }

    /// Serialize back into the handoff record.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(&ConfigHandoff::from(self))?)
    }

    /// Player names in configured order.
    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of distinct matchable faces.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cards required to complete a set (2 or 3).
    #[must_use]
    pub fn duplicates_per_set(&self) -> usize {
        self.difficulty.duplicates_per_set()
    }

    #[must_use]
    pub fn joker_included(&self) -> bool {
        self.joker_included
    }

    #[must_use]
    pub fn randomize_player_order(&self) -> bool {
        self.randomize_player_order
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let count = self.players.len();
        if count < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers { count });
        }
        if count > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers { count });
        }
        if let Some(index) = self.players.iter().position(|name| name.trim().is_empty()) {
            return Err(ConfigError::BlankPlayerName { index });
        }
        if self.pair_count == 0 {
            return Err(ConfigError::InvalidPairCount {
                pair_count: self.pair_count,
            });
        }
        let needed = self.pair_count + usize::from(self.joker_included);
        if needed > CARD_FACE_COUNT {
            return Err(ConfigError::NotEnoughFaces {
                needed,
                available: CARD_FACE_COUNT,
            });
        }
        Ok(())
    }
}

/// Builder for [`SessionConfig`].
///
/// Defaults match the configuration screen: 10 pairs, normal difficulty,
/// no joker, fixed seat order.
#[derive(Clone, Debug)]
pub struct SessionConfigBuilder {
    players: Vec<String>,
    pair_count: usize,
    difficulty: Difficulty,
    joker_included: bool,
    randomize_player_order: bool,
}

impl SessionConfigBuilder {
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: players.into_iter().map(Into::into).collect(),
            pair_count: PAIR_COUNT_OPTIONS[0],
            difficulty: Difficulty::Normal,
            joker_included: false,
            randomize_player_order: false,
        }
    }

    #[must_use]
    pub fn pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    #[must_use]
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn joker(mut self, included: bool) -> Self {
        self.joker_included = included;
        self
    }

    #[must_use]
    pub fn randomize_player_order(mut self, randomize: bool) -> Self {
        self.randomize_player_order = randomize;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        let config = SessionConfig {
            players: self.players,
            pair_count: self.pair_count,
            difficulty: self.difficulty,
            joker_included: self.joker_included,
            randomize_player_order: self.randomize_player_order,
        };
        config.validate()?;
        Ok(config)
    }
}

/// The record passed from the configuration step to the round.
///
/// Field names follow the JSON the configuration screen stores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigHandoff {
    pub player_names: Vec<String>,
    pub num_pairs: usize,
    #[serde(default)]
    pub is_hard_mode: bool,
    #[serde(default)]
    pub include_joker: bool,
    #[serde(default)]
    pub is_player_order_random: bool,
}

impl TryFrom<ConfigHandoff> for SessionConfig {
    type Error = ConfigError;

    fn try_from(handoff: ConfigHandoff) -> Result<Self, Self::Error> {
        SessionConfigBuilder::new(handoff.player_names)
            .pair_count(handoff.num_pairs)
            .difficulty(Difficulty::from_hard_mode(handoff.is_hard_mode))
            .joker(handoff.include_joker)
            .randomize_player_order(handoff.is_player_order_random)
            .build()
    }
}

impl From<&SessionConfig> for ConfigHandoff {
    fn from(config: &SessionConfig) -> Self {
        Self {
            player_names: config.players.clone(),
            num_pairs: config.pair_count,
            is_hard_mode: config.difficulty.is_hard(),
            include_joker: config.joker_included,
            is_player_order_random: config.randomize_player_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SessionConfig::builder(["A", "B"]).build().unwrap();

        assert_eq!(config.player_count(), 2);
        assert_eq!(config.pair_count(), 10);
        assert_eq!(config.duplicates_per_set(), 2);
        assert!(!config.joker_included());
        assert!(!config.randomize_player_order());
    }

    #[test]
    fn test_builder_hard_mode_with_joker() {
        let config = SessionConfig::builder(["A", "B", "C"])
            .pair_count(30)
            .difficulty(Difficulty::Hard)
            .joker(true)
            .randomize_player_order(true)
            .build()
            .unwrap();

        assert_eq!(config.duplicates_per_set(), 3);
        assert!(config.joker_included());
        assert!(config.randomize_player_order());
    }

    #[test]
    fn test_too_few_players() {
        let err = SessionConfig::builder(["Solo"]).build().unwrap_err();
        assert!(matches!(err, ConfigError::TooFewPlayers { count: 1 }));
    }

    #[test]
    fn test_too_many_players() {
        let names: Vec<String> = (0..11).map(|i| format!("P{i}")).collect();
        let err = SessionConfig::builder(names).build().unwrap_err();
        assert!(matches!(err, ConfigError::TooManyPlayers { count: 11 }));
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = SessionConfig::builder(["A", "   ", "C"]).build().unwrap_err();
        assert!(matches!(err, ConfigError::BlankPlayerName { index: 1 }));
        assert_eq!(err.to_string(), "player 2 has a blank name");

        let err = SessionConfig::builder(["", "B"]).build().unwrap_err();
        assert!(matches!(err, ConfigError::BlankPlayerName { index: 0 }));
    }

    #[test]
    fn test_padded_name_accepted() {
        let config = SessionConfig::builder([" Ann ", "Bo"]).build().unwrap();
        assert_eq!(config.players()[0], " Ann ");
    }

    #[test]
    fn test_pair_count_bounds() {
        let err = SessionConfig::builder(["A", "B"]).pair_count(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPairCount { pair_count: 0 }));

        assert!(SessionConfig::builder(["A", "B"]).pair_count(51).build().is_ok());

        let err = SessionConfig::builder(["A", "B"])
            .pair_count(51)
            .joker(true)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotEnoughFaces { needed: 52, available: 51 }
        ));
    }

    #[test]
    fn test_every_offered_pair_count_fits_with_joker() {
        for pairs in PAIR_COUNT_OPTIONS {
            let config = SessionConfig::builder(["A", "B"]).pair_count(pairs).joker(true).build();
            assert!(config.is_ok(), "{pairs} pairs should be playable with a joker");
        }
    }

    #[test]
    fn test_difficulty_mapping() {
        assert_eq!(Difficulty::from_hard_mode(false), Difficulty::Normal);
        assert_eq!(Difficulty::from_hard_mode(true), Difficulty::Hard);
        assert_eq!(Difficulty::Normal.duplicates_per_set(), 2);
        assert_eq!(Difficulty::Hard.duplicates_per_set(), 3);
    }

    #[test]
    fn test_handoff_json() {
        let json = r#"{
            "playerNames": ["Aki", "Ren"],
            "numPairs": 20,
            "isHardMode": true,
            "includeJoker": false
        }"#;

        let config = SessionConfig::from_json(json).unwrap();

        assert_eq!(config.players(), &["Aki".to_string(), "Ren".to_string()]);
        assert_eq!(config.pair_count(), 20);
        assert_eq!(config.difficulty(), Difficulty::Hard);
        assert!(!config.randomize_player_order());

        let back = SessionConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_handoff_malformed() {
        let err = SessionConfig::from_json(r#"{"numPairs": 10}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }
}
