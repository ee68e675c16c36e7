//! Card identifiers and the asset names they map to.
//!
//! A card is written as a rank followed by a suit: `2h`, `9s`, `Kd`, `Tc`.
//! `10` is accepted as an alias for `T` and input is case-insensitive, but
//! the canonical form (and therefore the asset file name) is always an
//! upper-case rank and a lower-case suit.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn symbol(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    fn from_symbol(s: &str) -> Option<Self> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// File name of this card's source image, e.g. `Kd.jpeg`.
    pub fn asset_name(&self) -> String {
        format!("{self}.jpeg")
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidCard(s.to_string());
        let trimmed = s.trim();
        let suit_char = trimmed.chars().last().ok_or_else(invalid)?;
        let (rank, _) = trimmed.split_at(trimmed.len() - suit_char.len_utf8());

        let rank = Rank::from_symbol(rank).ok_or_else(invalid)?;
        let suit = Suit::from_symbol(suit_char).ok_or_else(invalid)?;
        Ok(Self { rank, suit })
    }
}

/// Parse a list of card identifiers, preserving order.
pub fn parse_cards<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Card>, BoardError> {
    ids.iter().map(|id| id.as_ref().parse()).collect()
}
