//! Deck construction.
//!
//! A deck is laid out as sequential runs of face values, shuffled, and then,
//! when a joker is requested, one card is pulled out at random. The face
//! that lost a card can no longer complete a set and becomes the joker.
//!
//! Generating runs before shuffling gives exact multiplicities without any
//! retry loop.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::rng::{shuffle_with, IndexSource};

/// Face value printed on a card. Values start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Face(pub u16);

impl Face {
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card{}", self.0)
    }
}

/// Slot in the dealt grid, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardPosition(pub u16);

impl CardPosition {
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A dealt, shuffled deck. Fixed for the round until reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    faces: Vector<Face>,
    duplicates_per_set: usize,
    joker: Option<Face>,
}

impl Deck {
    /// Deal a deck of `pair_count` matchable faces.
    ///
    /// ## Algorithm
    ///
    /// 1. `face_count` is `pair_count`, plus one when a joker is included.
    /// 2. Position `i` gets face `(i mod face_count) + 1` for
    ///    `face_count * duplicates_per_set` positions.
    /// 3. Fisher–Yates shuffle.
    /// 4. With a joker, remove one uniformly chosen card. Its face keeps
    ///    `duplicates_per_set - 1` copies and never completes a set.
    pub fn build(
        pair_count: usize,
        duplicates_per_set: usize,
        joker_included: bool,
        source: &mut impl IndexSource,
    ) -> Self {
        let face_count = pair_count + usize::from(joker_included);
        let mut faces: Vec<Face> = (0..face_count * duplicates_per_set)
            .map(|i| Face((i % face_count + 1) as u16))
            .collect();

        shuffle_with(source, &mut faces);

        let joker = if joker_included && !faces.is_empty() {
            let at = source.next_index(faces.len());
            Some(faces.remove(at))
        } else {
            None
        };

        Self {
            faces: faces.into_iter().collect(),
            duplicates_per_set,
            joker,
        }
    }

    /// Wrap an explicit layout. Used for replaying a known grid.
    ///
    /// The joker, if any, is the face whose copy count is short of a full
    /// set. `duplicates_per_set` must be at least 2.
    pub fn from_faces(faces: impl IntoIterator<Item = Face>, duplicates_per_set: usize) -> Self {
        debug_assert!(duplicates_per_set >= 2, "a set needs at least two cards");
        let faces: Vector<Face> = faces.into_iter().collect();
        let joker = face_counts(faces.iter().copied())
            .into_iter()
            .find(|&(_, count)| count % duplicates_per_set != 0)
            .map(|(face, _)| face);
        Self {
            faces,
            duplicates_per_set,
            joker,
        }
    }

    /// Total number of cards on the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    #[must_use]
    pub fn duplicates_per_set(&self) -> usize {
        self.duplicates_per_set
    }

    /// The face that cannot complete a set, if a joker was dealt.
    #[must_use]
    pub fn joker(&self) -> Option<Face> {
        self.joker
    }

    /// Face at a position, or `None` if out of range.
    #[must_use]
    pub fn face(&self, position: CardPosition) -> Option<Face> {
        self.faces.get(position.index()).copied()
    }

    /// Whether the card at `position` shows the joker face.
    #[must_use]
    pub fn is_joker(&self, position: CardPosition) -> bool {
        self.joker.is_some() && self.face(position) == self.joker
    }

    /// Cards that can end up matched: everything but the joker copies.
    #[must_use]
    pub fn matchable_len(&self) -> usize {
        let joker_cards = match self.joker {
            Some(joker) => self.faces.iter().filter(|&&f| f == joker).count(),
            None => 0,
        };
        self.faces.len() - joker_cards
    }

    /// Iterate over faces in grid order.
    pub fn iter(&self) -> impl Iterator<Item = Face> + '_ {
        self.faces.iter().copied()
    }

    /// Iterate over every position in the grid.
    pub fn positions(&self) -> impl Iterator<Item = CardPosition> {
        (0..self.faces.len() as u16).map(CardPosition)
    }

    /// How many copies of each face are on the table.
    #[must_use]
    pub fn face_counts(&self) -> FxHashMap<Face, usize> {
        face_counts(self.iter())
    }
}

fn face_counts(faces: impl Iterator<Item = Face>) -> FxHashMap<Face, usize> {
    let mut counts = FxHashMap::default();
    for face in faces {
        *counts.entry(face).or_insert(0) += 1;
    }
    counts
}
