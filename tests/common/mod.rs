//! Shared helpers for integration tests.

#![allow(dead_code)]

use memory_match::{CardPosition, Deck, Face};
use tracing_subscriber::{fmt, EnvFilter};

/// Install a test subscriber once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, defaulting to `warn`.
/// Safe to call from every test.
pub fn init_logging() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

/// Every position holding `face`, in grid order.
pub fn positions_of(deck: &Deck, face: Face) -> Vec<CardPosition> {
    deck.positions()
        .filter(|&p| deck.face(p) == Some(face))
        .collect()
}

/// Two positions whose faces differ.
pub fn mismatched_pair(deck: &Deck) -> (CardPosition, CardPosition) {
    let first = CardPosition::new(0);
    let first_face = deck.face(first).unwrap();
    let second = deck
        .positions()
        .find(|&p| deck.face(p) != Some(first_face))
        .unwrap();
    (first, second)
}
