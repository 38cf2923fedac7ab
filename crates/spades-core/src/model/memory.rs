use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

/// Every card played in completed tricks of the current deal, in play order.
///
/// Only the trick-resolution step writes here; bots read it to tell which
/// top cards are already gone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    cards: Vec<Card>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(52),
        }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub(crate) fn record_trick(&mut self, trick: &Trick) {
        self.cards.extend(trick.cards());
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_seen(&self, rank: Rank, suit: Suit) -> bool {
        self.contains(Card::new(rank, suit))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
