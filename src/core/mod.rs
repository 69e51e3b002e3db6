//! Core types: players, configuration, moves, round state, RNG.
//!
//! This module holds everything a round is made of. The engine in
//! `rules` drives these types; nothing here performs I/O.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use rng::{shuffle_with, GameRng, GameRngState, IndexSource, ScriptedIndices};
pub use config::{
    ConfigError, ConfigHandoff, Difficulty, SessionConfig, SessionConfigBuilder,
    CARD_FACE_COUNT, MAX_PLAYERS, MIN_PLAYERS, PAIR_COUNT_OPTIONS,
};
pub use action::{Move, MoveRecord};
pub use state::{IgnoreReason, Revealed, RoundEvent, RoundState, TurnPhase};
