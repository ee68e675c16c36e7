//! Board stages and the cards each stage adds to the strip.

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::card::Card;
use crate::error::BoardError;

/// Flop (3 cards) → Turn (4) → River (5).
///
/// Every stage after the flop is composed from the previous stage's
/// artifact, so stages only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardStage {
    Flop,
    Turn,
    River,
}

impl BoardStage {
    pub const ALL: [BoardStage; 3] = [BoardStage::Flop, BoardStage::Turn, BoardStage::River];

    pub fn from_card_count(count: usize) -> Result<Self, BoardError> {
        match count {
            3 => Ok(BoardStage::Flop),
            4 => Ok(BoardStage::Turn),
            5 => Ok(BoardStage::River),
            other => Err(BoardError::InvalidCardCount(other)),
        }
    }

    pub fn card_count(self) -> usize {
        match self {
            BoardStage::Flop => 3,
            BoardStage::Turn => 4,
            BoardStage::River => 5,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            BoardStage::Flop => None,
            BoardStage::Turn => Some(BoardStage::Flop),
            BoardStage::River => Some(BoardStage::Turn),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            BoardStage::Flop => Some(BoardStage::Turn),
            BoardStage::Turn => Some(BoardStage::River),
            BoardStage::River => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BoardStage::Flop => "flop",
            BoardStage::Turn => "turn",
            BoardStage::River => "river",
        }
    }

    /// Artifact file name inside the output directory.
    pub fn file_name(self) -> String {
        format!("{}.jpeg", self.name())
    }

    /// Images a stage is combined from: the previous strip (if any) plus
    /// its new cards.
    pub fn input_count(self) -> usize {
        match self {
            BoardStage::Flop => 3,
            BoardStage::Turn => 2,
            BoardStage::River => 3,
        }
    }

    /// Cards (or their decoded images) pasted to the right of the previous
    /// stage's strip.
    ///
    /// The river pastes cards 3 and 4 after the turn strip, so the turn
    /// card appears twice on a river image.
    pub fn new_cards<T>(self, cards: &[T]) -> &[T] {
        match self {
            BoardStage::Flop => &cards[..3],
            BoardStage::Turn => &cards[3..4],
            BoardStage::River => &cards[3..5],
        }
    }
}

impl Display for BoardStage {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Check card count and uniqueness, returning the stage the board is at.
pub fn validate_board(cards: &[Card]) -> Result<BoardStage, BoardError> {
    let stage = BoardStage::from_card_count(cards.len())?;
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(*card) {
            return Err(BoardError::DuplicateCard(*card));
        }
    }
    Ok(stage)
}
