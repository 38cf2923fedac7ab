use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Clubs = 1,
    Diamonds = 2,
    Hearts = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts];

    /// Suits that never outrank another suit in a trick.
    pub const PLAIN: [Suit; 3] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Spades),
            1 => Some(Suit::Clubs),
            2 => Some(Suit::Diamonds),
            3 => Some(Suit::Hearts),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_spade(self) -> bool {
        matches!(self, Suit::Spades)
    }

    /// Grouping used when a hand is laid out for display: Spades, Diamonds,
    /// Clubs, Hearts. Unrelated to trick strength.
    pub const fn display_rank(self) -> u8 {
        match self {
            Suit::Spades => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Hearts => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Spades => "S",
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
        };
        f.write_str(symbol)
    }
}
