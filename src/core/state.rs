//! Round state and its transitions.
//!
//! ## RoundState
//!
//! Everything that changes during one round:
//! - The dealt deck (fixed until reset)
//! - Face-up cards awaiting resolution (`revealed`)
//! - Cards permanently matched
//! - Whose turn it is, the turn counter, and scores
//!
//! ## Transitions
//!
//! Transitions are pure: each takes `&self` and returns the next state
//! together with a [`RoundEvent`] describing what happened. Invalid or
//! redundant moves return an unchanged copy and `RoundEvent::Ignored`.
//!
//! The deck and the matched set are `im` structures, so the copy shares
//! storage with the previous state.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::Move;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{CardPosition, Deck, Face};
use crate::rules::RoundOutcome;

/// Face-up cards of the current attempt. Never more than a full set.
pub type Revealed = SmallVec<[CardPosition; 3]>;

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No cards face up this attempt.
    Idle,
    /// Some, but not a full set, face up.
    AwaitingMore,
    /// A full set is face up and does not match; waiting for acknowledgement.
    Mismatched,
    /// Every matchable card is matched.
    RoundOver,
}

/// Why a move was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    RoundOver,
    OutOfRange,
    AlreadyMatched,
    AlreadyRevealed,
    SelectionFull,
    NoPendingMismatch,
    SkipUnavailable,
}

/// What a transition did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// Nothing changed.
    Ignored(IgnoreReason),

    /// A card was turned face up and more are needed to resolve.
    Revealed { position: CardPosition, face: Face },

    /// A full set matched. The same player keeps the turn.
    Matched {
        positions: Revealed,
        face: Face,
        player: PlayerId,
        score: u32,
        round_over: bool,
    },

    /// A full set is face up and does not match.
    Mismatched {
        positions: Revealed,
        player: PlayerId,
    },

    /// Face-up cards turned back over and the turn moved on.
    TurnPassed { from: PlayerId, to: PlayerId },
}

impl RoundEvent {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, RoundEvent::Ignored(_))
    }
}

/// State of one round. Replaced wholesale on reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    deck: Deck,
    revealed: Revealed,
    matched: OrdSet<CardPosition>,
    current_player: PlayerId,
    scores: PlayerMap<u32>,
    /// Turn number (starts at 1).
    turn_number: u32,
    round_over: bool,
}

impl RoundState {
    /// Fresh state for a dealt deck: seat 0 to play, all scores zero.
    #[must_use]
    pub fn new(deck: Deck, player_count: usize) -> Self {
        let round_over = deck.matchable_len() == 0;
        Self {
            deck,
            revealed: SmallVec::new(),
            matched: OrdSet::new(),
            current_player: PlayerId::new(0),
            scores: PlayerMap::with_value(player_count, 0),
            turn_number: 1,
            round_over,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.scores.player_count()
    }

    /// Face-up, unresolved positions in the order they were flipped.
    #[must_use]
    pub fn revealed(&self) -> &[CardPosition] {
        &self.revealed
    }

    #[must_use]
    pub fn matched(&self) -> &OrdSet<CardPosition> {
        &self.matched
    }

    #[must_use]
    pub fn is_revealed(&self, position: CardPosition) -> bool {
        self.revealed.contains(&position)
    }

    #[must_use]
    pub fn is_matched(&self, position: CardPosition) -> bool {
        self.matched.contains(&position)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    /// Sum of all scores, i.e. the number of sets matched so far.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.scores.values().sum()
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.round_over
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        if self.round_over {
            TurnPhase::RoundOver
        } else if self.revealed.is_empty() {
            TurnPhase::Idle
        } else if self.revealed.len() < self.deck.duplicates_per_set() {
            TurnPhase::AwaitingMore
        } else {
            TurnPhase::Mismatched
        }
    }

    /// A full set is face up and does not match.
    #[must_use]
    pub fn has_pending_mismatch(&self) -> bool {
        self.phase() == TurnPhase::Mismatched
    }

    /// At least two cards are up, they already differ, and the set is not
    /// yet full. Only reachable when three cards make a set.
    #[must_use]
    pub fn can_skip(&self) -> bool {
        !self.round_over
            && self.revealed.len() >= 2
            && self.revealed.len() < self.deck.duplicates_per_set()
            && !self.revealed_faces_agree()
    }

    /// Winners or draw, once the round is over.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.round_over.then(|| RoundOutcome::from_scores(&self.scores))
    }

    // === Transitions ===

    /// Apply any move.
    #[must_use]
    pub fn apply(&self, action: Move) -> (Self, RoundEvent) {
        match action {
            Move::Select(position) => self.select_card(position),
            Move::AcknowledgeMismatch => self.acknowledge_mismatch(),
            Move::SkipTurn => self.skip_turn(),
        }
    }

    /// Flip the card at `position`.
    ///
    /// Ignored once the round is over, for positions off the grid, already
    /// matched or already face up, and while a full set is face up.
    #[must_use]
    pub fn select_card(&self, position: CardPosition) -> (Self, RoundEvent) {
        if self.round_over {
            return self.ignore(IgnoreReason::RoundOver);
        }
        let Some(face) = self.deck.face(position) else {
            return self.ignore(IgnoreReason::OutOfRange);
        };
        if self.matched.contains(&position) {
            return self.ignore(IgnoreReason::AlreadyMatched);
        }
        if self.revealed.len() >= self.deck.duplicates_per_set() {
            return self.ignore(IgnoreReason::SelectionFull);
        }
        if self.revealed.contains(&position) {
            return self.ignore(IgnoreReason::AlreadyRevealed);
        }

        let mut next = self.clone();
        next.revealed.push(position);

        if next.revealed.len() < next.deck.duplicates_per_set() {
            return (next, RoundEvent::Revealed { position, face });
        }

        let player = next.current_player;
        if next.revealed_faces_agree() {
            let positions = std::mem::take(&mut next.revealed);
            for &p in &positions {
                next.matched.insert(p);
            }
            next.scores[player] += 1;
            next.round_over = next.matched.len() == next.deck.matchable_len();

            let event = RoundEvent::Matched {
                positions,
                face,
                player,
                score: next.scores[player],
                round_over: next.round_over,
            };
            (next, event)
        } else {
            let positions = next.revealed.clone();
            (next, RoundEvent::Mismatched { positions, player })
        }
    }

    /// Turn mismatched cards back over and pass the turn.
    #[must_use]
    pub fn acknowledge_mismatch(&self) -> (Self, RoundEvent) {
        if !self.has_pending_mismatch() {
            return self.ignore(IgnoreReason::NoPendingMismatch);
        }
        self.pass_turn()
    }

    /// End the turn without flipping the last card of a doomed set.
    ///
    /// Lands in the same state as revealing the last card and then
    /// acknowledging the mismatch.
    #[must_use]
    pub fn skip_turn(&self) -> (Self, RoundEvent) {
        if !self.can_skip() {
            return self.ignore(IgnoreReason::SkipUnavailable);
        }
        self.pass_turn()
    }

    // === Internals ===

    fn ignore(&self, reason: IgnoreReason) -> (Self, RoundEvent) {
        (self.clone(), RoundEvent::Ignored(reason))
    }

    fn pass_turn(&self) -> (Self, RoundEvent) {
        let mut next = self.clone();
        let from = next.current_player;
        let to = from.next(next.player_count());

        next.revealed.clear();
        next.current_player = to;
        next.turn_number += 1;

        (next, RoundEvent::TurnPassed { from, to })
    }

    fn revealed_faces_agree(&self) -> bool {
        let mut faces = self.revealed.iter().filter_map(|&p| self.deck.face(p));
        match faces.next() {
            Some(first) => faces.all(|f| f == first),
            None => true,
        }
    }
}
