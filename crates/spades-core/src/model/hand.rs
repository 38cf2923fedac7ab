use crate::model::card::Card;
use crate::model::deck::DealError;
use crate::model::suit::Suit;

pub const HAND_SIZE: usize = 13;

/// A player's cards, kept in display order and never above 13 cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(HAND_SIZE),
        }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self::new();
        for card in cards {
            hand.add(card);
        }
        hand
    }

    /// Inserts in display order. A full hand ignores the card.
    pub fn add(&mut self, card: Card) {
        if self.cards.len() >= HAND_SIZE {
            return;
        }
        let index = self
            .cards
            .partition_point(|held| held.display_cmp(&card).is_le());
        self.cards.insert(index, card);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Card, DealError> {
        if index >= self.cards.len() {
            return Err(DealError::HandPosition {
                index,
                len: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index))
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn spade_count(&self) -> usize {
        self.count_suit(Suit::Spades)
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|card| card.suit == suit).count()
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|card| card.suit == suit)
    }

    pub fn only_spades(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.is_spade())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
