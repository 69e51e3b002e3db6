//! Round rules: the engine that drives a round and the result it produces.
//!
//! `RoundEngine` consumes a validated `SessionConfig`, deals the deck, and
//! applies user moves one at a time. `RoundOutcome` is derived from final
//! scores.

pub mod engine;
pub mod outcome;

pub use engine::{RoundEngine, Standing};
pub use outcome::RoundOutcome;
