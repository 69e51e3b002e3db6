//! Presentation-facing projections of round state.
//!
//! Nothing here changes a round. These helpers turn `RoundState` into what
//! a front end draws: which asset each card slot shows and how scores read.

use std::time::Duration;

pub mod card;
pub mod score;

pub use card::{card_asset, CardView, PLACEHOLDER_ASSET};
pub use score::{score_text, ScoreDisplay};

/// Pause between flipping the last card of a losing set and showing the
/// mismatch notice. Cosmetic: the mismatch is already decided.
///
/// ```
/// use memory_match::{RoundEvent, MISMATCH_NOTICE_DELAY};
///
/// let event = RoundEvent::Ignored(memory_match::IgnoreReason::RoundOver);
/// let wait = match event {
///     RoundEvent::Mismatched { .. } => Some(MISMATCH_NOTICE_DELAY),
///     _ => None,
/// };
/// assert_eq!(wait, None);
/// assert_eq!(MISMATCH_NOTICE_DELAY.as_millis(), 500);
/// ```
pub const MISMATCH_NOTICE_DELAY: Duration = Duration::from_millis(500);
