//! Randomness for deck shuffling and player-order randomization.
//!
//! ## Key Features
//!
//! - **Injectable**: The round engine only needs uniform indices, so it is
//!   generic over [`IndexSource`]. Tests can script every draw.
//! - **Deterministic**: Same seed produces identical decks.
//! - **Serializable**: O(1) state capture and restore.
//!
//! ```
//! use memory_match::core::{shuffle_with, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut left = vec![1, 2, 3, 4, 5];
//! let mut right = left.clone();
//! shuffle_with(&mut a, &mut left);
//! shuffle_with(&mut b, &mut right);
//!
//! assert_eq!(left, right);
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A provider of uniformly distributed indices.
///
/// Deck construction and roster shuffling draw every random decision
/// through this trait.
pub trait IndexSource {
    /// Return an index uniformly chosen from `0..upper`.
    ///
    /// Callers never pass `upper == 0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Shuffle a slice in place with Fisher–Yates.
///
/// Walks from the last index down to 1, swapping each element with a
/// uniformly chosen index in `0..=i`.
pub fn shuffle_with<T>(source: &mut impl IndexSource, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = source.next_index(i + 1);
        slice.swap(i, j);
    }
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG from a fresh OS-provided seed.
    ///
    /// The seed is kept, so a round played this way can still be replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl IndexSource for GameRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range_usize(0..upper)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// An [`IndexSource`] that replays a fixed script.
///
/// Each draw pops the next scripted value, clamped to `upper - 1`. Once the
/// script runs out every draw returns `upper - 1`, which makes
/// [`shuffle_with`] the identity permutation and picks the last element
/// wherever a single choice is made.
#[derive(Clone, Debug, Default)]
pub struct ScriptedIndices {
    script: VecDeque<usize>,
}

impl ScriptedIndices {
    /// Create a source that replays `script` in order.
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// A source with an empty script: identity shuffles, last-element picks.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Number of scripted draws not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl IndexSource for ScriptedIndices {
    fn next_index(&mut self, upper: usize) -> usize {
        let last = upper.saturating_sub(1);
        self.script.pop_front().map_or(last, |i| i.min(last))
    }
}
