//! Player moves and the round history.
//!
//! Every discrete user action that reaches the round engine is a [`Move`].
//! Moves that change the round are kept as [`MoveRecord`]s so a round can
//! be replayed against the same deck.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardPosition;

/// A single user action during a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Flip the card at a position.
    Select(CardPosition),
    /// Dismiss a mismatch: cards turn back over and the turn passes.
    AcknowledgeMismatch,
    /// End the turn early once a mismatch is already certain.
    SkipTurn,
}

impl Move {
    /// The position a move targets, if any.
    #[must_use]
    pub fn position(self) -> Option<CardPosition> {
        match self {
            Move::Select(position) => Some(position),
            Move::AcknowledgeMismatch | Move::SkipTurn => None,
        }
    }
}

/// A move that took effect, with who made it and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Seat whose turn it was.
    pub player: PlayerId,

    /// The move made.
    pub action: Move,

    /// Turn number when the move was made.
    pub turn: u32,

    /// Sequence number within the round.
    pub sequence: u32,
}

impl MoveRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Move, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
