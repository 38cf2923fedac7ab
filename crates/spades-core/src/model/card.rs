use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A playing card. Order cards with `display_cmp` or `strength_cmp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_spade(self) -> bool {
        self.suit.is_spade()
    }

    pub const fn is_ace(self) -> bool {
        matches!(self.rank, Rank::Ace)
    }

    /// Order used to keep a hand sorted on screen: suits grouped
    /// Spades, Diamonds, Clubs, Hearts, and the Ace first within its suit.
    pub fn display_cmp(&self, other: &Card) -> Ordering {
        self.suit
            .display_rank()
            .cmp(&other.suit.display_rank())
            .then(self.rank.number().cmp(&other.rank.number()))
    }

    /// Trick strength of `self` against `other` for a trick led in `lead`.
    ///
    /// Spades beat everything else, the lead suit beats the remaining suits,
    /// and within one suit the Ace is high. Two cards that are neither spades
    /// nor of the lead suit compare `Equal` when their suits differ; neither
    /// can win the trick.
    pub fn strength_cmp(&self, other: &Card, lead: Suit) -> Ordering {
        if self.suit == other.suit {
            return self.rank.strength().cmp(&other.rank.strength());
        }
        self.trick_power(lead).cmp(&other.trick_power(lead))
    }

    pub fn beats(&self, other: &Card, lead: Suit) -> bool {
        self.strength_cmp(other, lead) == Ordering::Greater
    }

    fn trick_power(&self, lead: Suit) -> u8 {
        if self.suit.is_spade() {
            32 + self.rank.strength()
        } else if self.suit == lead {
            16 + self.rank.strength()
        } else {
            0
        }
    }

    /// Long name, e.g. `Ace of Spades`.
    pub fn name(&self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
