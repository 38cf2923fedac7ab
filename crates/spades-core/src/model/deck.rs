use crate::model::card::Card;
use crate::model::hand::{HAND_SIZE, Hand};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::fmt;

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// Drawing from an exhausted deck or hand. Callers treat this as fatal to the
/// current game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    DeckExhausted { remaining: usize },
    HandPosition { index: usize, len: usize },
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::DeckExhausted { remaining } => {
                write!(f, "cannot deal {HAND_SIZE} cards, only {remaining} remain")
            }
            DealError::HandPosition { index, len } => {
                write!(f, "hand position {index} out of range for {len} cards")
            }
        }
    }
}

impl std::error::Error for DealError {}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// All 52 cards in a seeded uniform shuffle.
    pub fn new(seed: u64) -> Self {
        Self::shuffled_with_seed(seed)
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Removes the next 13 cards from the top of the deck.
    pub fn deal_hand(&mut self) -> Result<Hand, DealError> {
        if self.cards.len() < HAND_SIZE {
            return Err(DealError::DeckExhausted {
                remaining: self.cards.len(),
            });
        }
        let dealt: Vec<Card> = self.cards.drain(..HAND_SIZE).collect();
        Ok(Hand::with_cards(dealt))
    }

    pub fn deal_four(&mut self) -> Result<[Hand; 4], DealError> {
        Ok([
            self.deal_hand()?,
            self.deal_hand()?,
            self.deal_hand()?,
            self.deal_hand()?,
        ])
    }
}
