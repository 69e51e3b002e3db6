//! Score display.
//!
//! Scores can be hidden from the table at any time. Hiding is a display
//! toggle only; the round keeps counting.

use serde::{Deserialize, Serialize};

/// Whether scores are currently shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDisplay {
    visible: bool,
}

impl Default for ScoreDisplay {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl ScoreDisplay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.visible
    }

    /// Flip between shown and hidden.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Text for a score under the current setting.
    #[must_use]
    pub fn text(self, score: u32) -> String {
        if self.visible {
            score_text(score)
        } else {
            "???".to_string()
        }
    }
}

/// "0 point", "1 point", "N points".
#[must_use]
pub fn score_text(score: u32) -> String {
    match score {
        0 | 1 => format!("{score} point"),
        _ => format!("{score} points"),
    }
}
