//! End-of-round result.

use serde::{Deserialize, Serialize};

use crate::core::player::{PlayerId, PlayerMap};

/// Result of a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Everyone holding the top score. A strict subset of the table; ties
    /// inside it are co-winners.
    Winners(Vec<PlayerId>),
    /// Every player holds the top score.
    Draw,
}

impl RoundOutcome {
    /// Decide the outcome from final scores.
    ///
    /// ```
    /// use memory_match::core::{PlayerId, PlayerMap};
    /// use memory_match::rules::RoundOutcome;
    ///
    /// let scores = PlayerMap::from_vec(vec![2, 2, 1]);
    /// assert_eq!(
    ///     RoundOutcome::from_scores(&scores),
    ///     RoundOutcome::Winners(vec![PlayerId::new(0), PlayerId::new(1)])
    /// );
    /// ```
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<u32>) -> Self {
        let max = scores.values().copied().max().unwrap_or(0);
        let winners: Vec<PlayerId> = scores
            .iter()
            .filter(|&(_, &score)| score == max)
            .map(|(player, _)| player)
            .collect();

        if winners.len() == scores.player_count() {
            RoundOutcome::Draw
        } else {
            RoundOutcome::Winners(winners)
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            RoundOutcome::Winners(ps) => ps.contains(&player),
            RoundOutcome::Draw => false,
        }
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, RoundOutcome::Draw)
    }

    /// Winning seats; empty on a draw.
    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        match self {
            RoundOutcome::Winners(ps) => ps,
            RoundOutcome::Draw => &[],
        }
    }
}
