//! # memory-match
//!
//! Round engine for a multiplayer memory (concentration) card game.
//!
//! Players take turns flipping cards looking for complete sets: pairs in
//! normal mode, triples in hard mode. A match scores a point and keeps the
//! turn; a mismatch passes it. An optional joker is a card that can never
//! complete a set.
//!
//! ## Design Principles
//!
//! 1. **Validate Up Front**: `SessionConfig` is checked before a round can
//!    start. Once dealt, a round cannot fail; bad moves are ignored.
//!
//! 2. **Pure Transitions**: `RoundState` transitions return the next state
//!    and an event instead of mutating fields piecemeal.
//!
//! 3. **Injectable Randomness**: Dealing draws through `IndexSource`, so
//!    tests can script every shuffle.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, moves, round state, RNG
//! - `cards`: Face values, grid positions, deck construction
//! - `rules`: The round engine and round outcome
//! - `view`: Card slot views, asset names, score display

pub mod core;
pub mod cards;
pub mod rules;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng, GameRngState, IndexSource, ScriptedIndices,
    ConfigError, ConfigHandoff, Difficulty, SessionConfig, SessionConfigBuilder,
    Move, MoveRecord,
    IgnoreReason, RoundEvent, RoundState, TurnPhase,
};

pub use crate::cards::{CardPosition, Deck, Face};

pub use crate::rules::{RoundEngine, RoundOutcome, Standing};

pub use crate::view::{CardView, ScoreDisplay, MISMATCH_NOTICE_DELAY};
