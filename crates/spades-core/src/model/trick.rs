use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

/// Winner of a completed trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickResult {
    pub winner: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    AlreadyPlayed(PlayerPosition),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            TrickError::AlreadyPlayed(position) => {
                write!(f, "{position} has already played this trick")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    /// Card played by `seat` in this trick, if any.
    pub fn card_of(&self, seat: PlayerPosition) -> Option<Card> {
        self.plays
            .iter()
            .find(|play| play.position == seat)
            .map(|play| play.card)
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }

    pub fn contains_spade(&self) -> bool {
        self.plays.iter().any(|play| play.card.is_spade())
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.position == position) {
            return Err(TrickError::AlreadyPlayed(position));
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        self.plays.push(Play { position, card });
        Ok(())
    }

    /// The play currently holding the trick. Works on partial tricks, so a
    /// bot can see what it has to beat.
    pub fn best_play(&self) -> Option<Play> {
        let (first, rest) = self.plays.split_first()?;
        let lead = first.card.suit;
        let best = rest.iter().fold(*first, |best, candidate| {
            let takes_over = (candidate.card.is_spade() && !best.card.is_spade())
                || (candidate.card.suit == best.card.suit
                    && candidate.card.beats(&best.card, lead))
                || (candidate.card.suit == lead
                    && best.card.suit != lead
                    && !best.card.is_spade());
            if takes_over { *candidate } else { best }
        });
        Some(best)
    }

    pub fn winner(&self) -> Option<TrickResult> {
        if !self.is_complete() {
            return None;
        }
        self.best_play().map(|play| TrickResult {
            winner: play.position,
            card: play.card,
        })
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.plays
            .last()
            .map(|play| play.position.next())
            .unwrap_or(self.leader)
    }
}
