//! Card slot views and asset naming.

use serde::{Deserialize, Serialize};

use crate::cards::{CardPosition, Face};
use crate::core::RoundState;

/// Asset shown for a face-down card.
pub const PLACEHOLDER_ASSET: &str = "mark_question";

/// What a single grid slot shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardView {
    FaceDown,
    /// Face up and awaiting resolution.
    Revealed(Face),
    /// Permanently matched.
    Matched(Face),
}

impl CardView {
    /// View of `position` in `state`. Off-grid positions read as face down.
    #[must_use]
    pub fn of(state: &RoundState, position: CardPosition) -> Self {
        match state.deck().face(position) {
            Some(face) if state.is_matched(position) => CardView::Matched(face),
            Some(face) if state.is_revealed(position) => CardView::Revealed(face),
            _ => CardView::FaceDown,
        }
    }

    /// Views for every slot, in grid order.
    #[must_use]
    pub fn grid(state: &RoundState) -> Vec<Self> {
        state
            .deck()
            .positions()
            .map(|position| Self::of(state, position))
            .collect()
    }

    /// The visible face, if any.
    #[must_use]
    pub fn face(self) -> Option<Face> {
        match self {
            CardView::FaceDown => None,
            CardView::Revealed(face) | CardView::Matched(face) => Some(face),
        }
    }

    /// Asset name to draw for this slot.
    #[must_use]
    pub fn asset(self) -> String {
        card_asset(self.face())
    }
}

/// Asset name for a face: `card<value>`, or the placeholder when hidden.
#[must_use]
pub fn card_asset(face: Option<Face>) -> String {
    match face {
        Some(face) => face.to_string(),
        None => PLACEHOLDER_ASSET.to_string(),
    }
}
