//! The round engine.
//!
//! `RoundEngine` owns everything one round needs:
//! - The validated `SessionConfig` it was started from
//! - The seated roster (possibly shuffled)
//! - The randomness source used for dealing
//! - The current `RoundState` and the history of applied moves
//!
//! All transitions happen synchronously in response to a single user action.
//! The engine replaces its `RoundState` with the one returned by the pure
//! transition and reports the resulting `RoundEvent`.
//!
//! ## Usage
//!
//! ```
//! use memory_match::cards::CardPosition;
//! use memory_match::core::SessionConfig;
//! use memory_match::rules::RoundEngine;
//!
//! let config = SessionConfig::builder(["Aki", "Ren"]).pair_count(10).build()?;
//! let mut engine = RoundEngine::with_seed(config, 7);
//!
//! engine.select_card(CardPosition::new(0));
//! assert_eq!(engine.state().revealed(), &[CardPosition::new(0)]);
//! # Ok::<(), memory_match::core::ConfigError>(())
//! ```

use im::Vector;
use tracing::{debug, info};

use crate::cards::{CardPosition, Deck};
use crate::core::action::{Move, MoveRecord};
use crate::core::config::SessionConfig;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::{shuffle_with, GameRng, GameRngState, IndexSource};
use crate::core::state::{RoundEvent, RoundState};
use crate::rules::RoundOutcome;

/// A player's name and score, in seat order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Standing<'a> {
    pub player: PlayerId,
    pub name: &'a str,
    pub score: u32,
}

/// Drives one round from deal to result.
#[derive(Clone, Debug)]
pub struct RoundEngine<R: IndexSource = GameRng> {
    config: SessionConfig,
    roster: PlayerMap<String>,
    source: R,
    state: RoundState,
    history: Vector<MoveRecord>,
}

impl RoundEngine<GameRng> {
    /// Start a round with an OS-seeded RNG.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_source(config, GameRng::from_entropy())
    }

    /// Start a reproducible round.
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::with_source(config, GameRng::new(seed))
    }

    /// Capture the RNG so future deals can be reproduced.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.source.state()
    }
}

impl<R: IndexSource> RoundEngine<R> {
    /// Start a round drawing all randomness from `source`.
    ///
    /// Seats are shuffled first (if configured), then the deck is dealt.
    pub fn with_source(config: SessionConfig, mut source: R) -> Self {
        let roster = seat_players(&config, &mut source);
        let state = deal(&config, &mut source);

        info!(
            players = config.player_count(),
            pairs = config.pair_count(),
            duplicates = config.duplicates_per_set(),
            joker = config.joker_included(),
            cards = state.deck().len(),
            "Round dealt"
        );

        Self {
            config,
            roster,
            source,
            state,
            history: Vector::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Player names in seat (turn) order.
    #[must_use]
    pub fn roster(&self) -> &PlayerMap<String> {
        &self.roster
    }

    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> &str {
        &self.roster[player]
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        self.state.deck()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    #[must_use]
    pub fn current_player_name(&self) -> &str {
        self.player_name(self.state.current_player())
    }

    /// Moves that took effect this round, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    #[must_use]
    pub fn can_skip(&self) -> bool {
        self.state.can_skip()
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.state.is_round_over()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.state.outcome()
    }

    /// Names of the winning players. Empty while the round runs or on a draw.
    #[must_use]
    pub fn winner_names(&self) -> Vec<&str> {
        self.outcome()
            .map(|outcome| {
                outcome
                    .winners()
                    .iter()
                    .map(|&p| self.player_name(p))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.outcome().is_some_and(|outcome| outcome.is_draw())
    }

    /// Every player's name and score in seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing<'_>> {
        self.roster
            .iter()
            .map(|(player, name)| Standing {
                player,
                name,
                score: self.state.score(player),
            })
            .collect()
    }

    // === Moves ===

    /// Apply a move and record it if it took effect.
    pub fn apply(&mut self, action: Move) -> RoundEvent {
        let player = self.state.current_player();
        let turn = self.state.turn_number();
        let (next, event) = self.state.apply(action);

        self.trace_event(action, &event);

        if !event.is_ignored() {
            let sequence = self.history.len() as u32;
            self.history
                .push_back(MoveRecord::new(player, action, turn, sequence));
        }
        self.state = next;

        if let RoundEvent::Matched { round_over: true, .. } = event {
            info!(
                winners = ?self.winner_names(),
                draw = self.is_draw(),
                "Round over"
            );
        }

        event
    }

    pub fn select_card(&mut self, position: CardPosition) -> RoundEvent {
        self.apply(Move::Select(position))
    }

    pub fn acknowledge_mismatch(&mut self) -> RoundEvent {
        self.apply(Move::AcknowledgeMismatch)
    }

    pub fn skip_turn(&mut self) -> RoundEvent {
        self.apply(Move::SkipTurn)
    }

    /// Deal a fresh round with the same configuration.
    ///
    /// Seats are shuffled again when the configuration asks for random
    /// order. Scores, turn, and history start over.
    pub fn reset(&mut self) {
        if self.config.randomize_player_order() {
            self.roster = seat_players(&self.config, &mut self.source);
        }
        self.state = deal(&self.config, &mut self.source);
        self.history = Vector::new();

        info!(cards = self.state.deck().len(), "Round reset");
    }

    fn trace_event(&self, action: Move, event: &RoundEvent) {
        let player = self.current_player_name();
        match event {
            RoundEvent::Ignored(reason) => {
                debug!(player, ?reason, position = ?action.position(), "Move ignored");
            }
            RoundEvent::Revealed { position, face } => {
                debug!(player, %position, %face, "Card revealed");
            }
            RoundEvent::Matched { face, score, .. } => {
                info!(player, %face, score, "Set matched");
            }
            RoundEvent::Mismatched { positions, .. } => {
                debug!(player, ?positions, "Mismatch");
            }
            RoundEvent::TurnPassed { to, .. } => {
                debug!(from = player, to = self.player_name(*to), "Turn passed");
            }
        }
    }
}

fn seat_players(config: &SessionConfig, source: &mut impl IndexSource) -> PlayerMap<String> {
    let mut names = config.players().to_vec();
    if config.randomize_player_order() {
        shuffle_with(source, &mut names);
    }
    PlayerMap::from_vec(names)
}

fn deal(config: &SessionConfig, source: &mut impl IndexSource) -> RoundState {
    let deck = Deck::build(
        config.pair_count(),
        config.duplicates_per_set(),
        config.joker_included(),
        source,
    );
    RoundState::new(deck, config.player_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedIndices;
    use crate::core::state::{IgnoreReason, TurnPhase};

    fn config(players: &[&str], pairs: usize) -> SessionConfig {
        SessionConfig::builder(players.iter().copied())
            .pair_count(pairs)
            .build()
            .unwrap()
    }

    fn pos(i: u16) -> CardPosition {
        CardPosition::new(i)
    }

    /// Identity deal: faces are laid out 1..=n, 1..=n.
    fn unshuffled(config: SessionConfig) -> RoundEngine<ScriptedIndices> {
        RoundEngine::with_source(config, ScriptedIndices::identity())
    }

    #[test]
    fn test_engine_deals_from_config() {
        let engine = RoundEngine::with_seed(config(&["A", "B"], 10), 1);

        assert_eq!(engine.deck().len(), 20);
        assert_eq!(engine.current_player_name(), "A");
        assert_eq!(engine.state().phase(), TurnPhase::Idle);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_match_then_mismatch() {
        // Layout: [1, 2, 3, 1, 2, 3]
        let mut engine = unshuffled(config(&["A", "B"], 3));

        engine.select_card(pos(0));
        let event = engine.select_card(pos(3));
        assert!(matches!(event, RoundEvent::Matched { score: 1, .. }));
        assert_eq!(engine.current_player_name(), "A");

        engine.select_card(pos(1));
        let event = engine.select_card(pos(2));
        assert!(matches!(event, RoundEvent::Mismatched { .. }));
        assert_eq!(engine.current_player_name(), "A");

        engine.acknowledge_mismatch();
        assert_eq!(engine.current_player_name(), "B");
        assert_eq!(engine.history().len(), 5);
    }

    #[test]
    fn test_ignored_moves_not_recorded() {
        let mut engine = unshuffled(config(&["A", "B"], 3));

        engine.select_card(pos(0));
        let event = engine.select_card(pos(0));

        assert_eq!(event, RoundEvent::Ignored(IgnoreReason::AlreadyRevealed));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_history_records_turn_and_sequence() {
        let mut engine = unshuffled(config(&["A", "B"], 3));

        engine.select_card(pos(0));
        engine.select_card(pos(1));
        engine.acknowledge_mismatch();
        engine.select_card(pos(2));

        let last = engine.history().back().unwrap();
        assert_eq!(last.player, PlayerId::new(1));
        assert_eq!(last.turn, 2);
        assert_eq!(last.sequence, 3);
        assert_eq!(last.action, Move::Select(pos(2)));
    }

    #[test]
    fn test_play_to_completion() {
        let mut engine = unshuffled(config(&["A", "B"], 3));

        for (a, b) in [(0, 3), (1, 4), (2, 5)] {
            engine.select_card(pos(a));
            engine.select_card(pos(b));
        }

        assert!(engine.is_round_over());
        assert_eq!(engine.winner_names(), vec!["A"]);
        assert!(!engine.is_draw());
    }

    #[test]
    fn test_draw_names_nobody() {
        // Layout: [1, 2, 3, 4, 1, 2, 3, 4]
        let mut engine = unshuffled(config(&["A", "B"], 4));

        for (a, b) in [(0, 4), (1, 5), (2, 3)] {
            engine.select_card(pos(a));
            engine.select_card(pos(b));
        }
        engine.acknowledge_mismatch();
        for (a, b) in [(2, 6), (3, 7)] {
            engine.select_card(pos(a));
            engine.select_card(pos(b));
        }

        assert!(engine.is_round_over());
        assert!(engine.is_draw());
        assert!(engine.winner_names().is_empty());
    }

    #[test]
    fn test_standings() {
        let mut engine = unshuffled(config(&["A", "B", "C"], 3));
        engine.select_card(pos(0));
        engine.select_card(pos(3));

        let standings = engine.standings();
        assert_eq!(standings.len(), 3);
        assert_eq!(standings[0].name, "A");
        assert_eq!(standings[0].score, 1);
        assert_eq!(standings[2].score, 0);
    }

    #[test]
    fn test_reset_starts_over() {
        let mut engine = RoundEngine::with_seed(config(&["A", "B"], 10), 3);
        let first_deck = engine.deck().clone();

        engine.select_card(pos(0));
        engine.select_card(pos(1));
        engine.acknowledge_mismatch();
        engine.reset();

        assert_eq!(engine.current_player(), PlayerId::new(0));
        assert_eq!(engine.state().total_score(), 0);
        assert!(engine.state().revealed().is_empty());
        assert!(engine.state().matched().is_empty());
        assert!(engine.history().is_empty());
        assert_eq!(engine.deck().len(), 20);
        assert_ne!(engine.deck(), &first_deck);
    }

    #[test]
    fn test_reset_keeps_fixed_order() {
        let mut engine = RoundEngine::with_seed(config(&["A", "B", "C"], 10), 11);
        for _ in 0..5 {
            engine.reset();
            assert_eq!(engine.roster().as_slice(), &["A", "B", "C"]);
        }
    }

    #[test]
    fn test_randomized_order_is_permutation() {
        let config = SessionConfig::builder(["A", "B", "C", "D"])
            .randomize_player_order(true)
            .build()
            .unwrap();
        let mut engine = RoundEngine::with_seed(config, 21);

        for _ in 0..5 {
            let mut names = engine.roster().as_slice().to_vec();
            names.sort();
            assert_eq!(names, vec!["A", "B", "C", "D"]);
            engine.reset();
        }
    }

    #[test]
    fn test_randomized_order_uses_source() {
        let config = SessionConfig::builder(["A", "B", "C"])
            .pair_count(1)
            .randomize_player_order(true)
            .build()
            .unwrap();
        // Seat shuffle: i=2 swaps with 0, i=1 keeps -> [C, B, A]
        let engine = RoundEngine::with_source(config, ScriptedIndices::new([0, 1]));

        assert_eq!(engine.roster().as_slice(), &["C", "B", "A"]);
        assert_eq!(engine.current_player_name(), "C");
    }

    #[test]
    fn test_reset_reshuffles_seats() {
        let config = SessionConfig::builder(["A", "B", "C"])
            .pair_count(1)
            .randomize_player_order(true)
            .build()
            .unwrap();
        // Deal: seats [0, 1] -> [C, B, A], deck keeps order.
        // Reset: seats [0, 0] -> [C, B, A] then [B, C, A].
        let mut engine =
            RoundEngine::with_source(config, ScriptedIndices::new([0, 1, 1, 0, 0]));
        assert_eq!(engine.roster().as_slice(), &["C", "B", "A"]);

        engine.reset();

        assert_eq!(engine.roster().as_slice(), &["B", "C", "A"]);
        assert_eq!(engine.current_player_name(), "B");
    }

    #[test]
    fn test_rng_state_reproduces_next_deal() {
        let mut engine = RoundEngine::with_seed(config(&["A", "B"], 10), 5);
        let saved = engine.rng_state();

        engine.reset();
        let dealt = engine.deck().clone();

        let replay = Deck::build(10, 2, false, &mut GameRng::from_state(&saved));
        assert_eq!(replay, dealt);
    }
}
