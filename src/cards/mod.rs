//! Cards on the table: face values, grid positions, and the dealt deck.
//!
//! ## Key Types
//!
//! - `Face`: Value printed on a card (1-based)
//! - `CardPosition`: Slot in the dealt grid
//! - `Deck`: Shuffled layout for one round, with an optional joker

pub mod deck;

pub use deck::{CardPosition, Deck, Face};
