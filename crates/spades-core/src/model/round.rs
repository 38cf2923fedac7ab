use crate::model::card::Card;
use crate::model::deck::{DealError, Deck};
use crate::model::hand::{HAND_SIZE, Hand};
use crate::model::memory::Memory;
use crate::model::player::{PlayerPosition, Team};
use crate::model::score::bid_for;
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError, TrickResult};
use std::fmt;
use tracing::{Level, event};

/// State of a single deal: hands, forced bids, the trick in progress and
/// everything already played.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    bids: [u8; 4],
    tricks_taken: [u8; 4],
    current_trick: Trick,
    memory: Memory,
    tricks_completed: usize,
    starting_player: PlayerPosition,
    spades_broken: bool,
}

/// Cards `hand` may legally play into `trick`.
///
/// Followers must follow the lead suit when they can. A leader may not lead a
/// spade until spades are broken, unless the hand holds nothing else.
pub fn legal_cards(hand: &Hand, trick: &Trick, spades_broken: bool) -> Vec<Card> {
    if trick.is_complete() {
        return Vec::new();
    }
    match trick.lead_suit() {
        Some(lead) if hand.has_suit(lead) => {
            hand.iter().copied().filter(|card| card.suit == lead).collect()
        }
        Some(_) => hand.cards().to_vec(),
        None if spades_broken || hand.only_spades() => hand.cards().to_vec(),
        None => hand.iter().copied().filter(|card| !card.is_spade()).collect(),
    }
}

impl RoundState {
    /// Deals 13 cards to each seat in rotation order starting with South.
    pub fn deal(deck: &mut Deck, starting_player: PlayerPosition) -> Result<Self, DealError> {
        let hands = deck.deal_four()?;
        Ok(Self::from_hands(hands, starting_player))
    }

    pub fn from_hands(hands: [Hand; 4], starting_player: PlayerPosition) -> Self {
        let bids = [
            bid_for(&hands[0]),
            bid_for(&hands[1]),
            bid_for(&hands[2]),
            bid_for(&hands[3]),
        ];
        Self {
            hands,
            bids,
            tricks_taken: [0; 4],
            current_trick: Trick::new(starting_player),
            memory: Memory::new(),
            tricks_completed: 0,
            starting_player,
            spades_broken: false,
        }
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn bid(&self, seat: PlayerPosition) -> u8 {
        self.bids[seat.index()]
    }

    pub fn team_bid(&self, team: Team) -> u8 {
        team.members().iter().map(|seat| self.bid(*seat)).sum()
    }

    pub fn tricks_taken(&self, seat: PlayerPosition) -> u8 {
        self.tricks_taken[seat.index()]
    }

    pub fn team_tricks(&self, team: Team) -> u8 {
        team.members()
            .iter()
            .map(|seat| self.tricks_taken(*seat))
            .sum()
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn starting_player(&self) -> PlayerPosition {
        self.starting_player
    }

    pub fn tricks_completed(&self) -> usize {
        self.tricks_completed
    }

    pub fn spades_broken(&self) -> bool {
        self.spades_broken
    }

    /// Seat whose turn it is. `None` while a full trick awaits resolution or
    /// once every hand is empty.
    pub fn expected_seat(&self) -> Option<PlayerPosition> {
        if self.current_trick.is_complete() || self.is_finished() {
            None
        } else {
            Some(self.current_trick.expected_position())
        }
    }

    pub fn legal_cards(&self, seat: PlayerPosition) -> Vec<Card> {
        legal_cards(
            &self.hands[seat.index()],
            &self.current_trick,
            self.spades_broken,
        )
    }

    pub fn is_finished(&self) -> bool {
        self.current_trick.is_empty() && self.hands.iter().all(Hand::is_empty)
    }

    pub fn play_card(
        &mut self,
        seat: PlayerPosition,
        card: Card,
    ) -> Result<PlayOutcome, PlayError> {
        if self.current_trick.is_complete() {
            return Err(PlayError::Trick(TrickError::TrickComplete));
        }

        let expected = self.current_trick.expected_position();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        let hand = &self.hands[seat.index()];
        if !hand.contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        match self.current_trick.lead_suit() {
            Some(lead) => {
                if card.suit != lead && hand.has_suit(lead) {
                    return Err(PlayError::MustFollowSuit(lead));
                }
            }
            None => {
                if card.is_spade() && !self.spades_broken && !hand.only_spades() {
                    return Err(PlayError::SpadesNotBroken);
                }
            }
        }

        self.current_trick
            .play(seat, card)
            .map_err(PlayError::Trick)?;
        self.hands[seat.index()].remove(card);

        let broke_spades = card.is_spade() && !self.spades_broken;
        if card.is_spade() {
            self.spades_broken = true;
        }

        if self.current_trick.is_complete() {
            Ok(PlayOutcome::TrickReady { broke_spades })
        } else {
            Ok(PlayOutcome::Played {
                next: self.current_trick.expected_position(),
                broke_spades,
            })
        }
    }

    /// Credits the winner of a full trick, records its cards and opens the
    /// next trick with the winner leading.
    pub fn resolve_trick(&mut self) -> Option<TrickResult> {
        let result = self.current_trick.winner()?;
        self.memory.record_trick(&self.current_trick);
        self.tricks_taken[result.winner.index()] += 1;
        self.tricks_completed += 1;

        event!(
            target: "spades_core::round",
            Level::DEBUG,
            trick = self.tricks_completed,
            winner = %result.winner,
            card = %result.card,
            lead = ?self.current_trick.lead_suit(),
            spades_broken = self.spades_broken,
        );

        self.current_trick = Trick::new(result.winner);
        debug_assert!(self.tricks_completed <= HAND_SIZE);
        Some(result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played {
        next: PlayerPosition,
        broke_spades: bool,
    },
    TrickReady {
        broke_spades: bool,
    },
}

/// An illegal card play. Recoverable: the seat is asked again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotInPlayPhase,
    CardNotInHand(Card),
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    MustFollowSuit(Suit),
    SpadesNotBroken,
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotInPlayPhase => write!(f, "no trick is being played"),
            PlayError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            PlayError::MustFollowSuit(suit) => write!(f, "must follow {}", suit.name()),
            PlayError::SpadesNotBroken => write!(f, "spades have not been broken"),
            PlayError::Trick(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for PlayError {}

#[cfg(test)]
mod tests {
    use super::{PlayError, PlayOutcome, RoundState, legal_cards};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::player::{PlayerPosition, Team};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::model::trick::Trick;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn constructed_round() -> RoundState {
        let hands = [
            Hand::with_cards(vec![
                c(Rank::Two, Suit::Hearts),
                c(Rank::Ace, Suit::Spades),
            ]),
            Hand::with_cards(vec![
                c(Rank::King, Suit::Hearts),
                c(Rank::Three, Suit::Clubs),
            ]),
            Hand::with_cards(vec![
                c(Rank::Five, Suit::Clubs),
                c(Rank::Two, Suit::Spades),
            ]),
            Hand::with_cards(vec![
                c(Rank::Ace, Suit::Hearts),
                c(Rank::Nine, Suit::Diamonds),
            ]),
        ];
        RoundState::from_hands(hands, PlayerPosition::South)
    }

    #[test]
    fn dealing_distributes_thirteen_cards_and_forced_bids() {
        let mut deck = Deck::new(3);
        let round = RoundState::deal(&mut deck, PlayerPosition::North).unwrap();

        for seat in PlayerPosition::LOOP {
            assert_eq!(round.hand(seat).len(), 13, "{seat} should have 13 cards");
            assert_eq!(round.bid(seat) as usize, round.hand(seat).spade_count());
        }
        let total_bid: u8 = Team::BOTH.iter().map(|team| round.team_bid(*team)).sum();
        assert_eq!(total_bid, 13);
        assert_eq!(round.current_trick().leader(), PlayerPosition::North);
        assert!(!round.spades_broken());
    }

    #[test]
    fn leader_cannot_lead_spades_before_broken() {
        let mut round = constructed_round();
        assert_eq!(
            round.play_card(PlayerPosition::South, c(Rank::Ace, Suit::Spades)),
            Err(PlayError::SpadesNotBroken)
        );
        assert_eq!(
            round.legal_cards(PlayerPosition::South),
            vec![c(Rank::Two, Suit::Hearts)]
        );
    }

    #[test]
    fn leader_holding_only_spades_may_lead_one() {
        let hand = Hand::with_cards(vec![c(Rank::Two, Suit::Spades), c(Rank::Ace, Suit::Spades)]);
        let trick = Trick::new(PlayerPosition::South);
        assert_eq!(legal_cards(&hand, &trick, false).len(), 2);
    }

    #[test]
    fn follow_suit_is_required() {
        let mut round = constructed_round();
        round
            .play_card(PlayerPosition::South, c(Rank::Two, Suit::Hearts))
            .unwrap();
        assert_eq!(
            round.play_card(PlayerPosition::West, c(Rank::Three, Suit::Clubs)),
            Err(PlayError::MustFollowSuit(Suit::Hearts))
        );
        assert_eq!(
            round.play_card(PlayerPosition::North, c(Rank::Five, Suit::Clubs)),
            Err(PlayError::OutOfTurn {
                expected: PlayerPosition::West,
                actual: PlayerPosition::North,
            })
        );
        assert_eq!(
            round.play_card(PlayerPosition::West, c(Rank::Ace, Suit::Hearts)),
            Err(PlayError::CardNotInHand(c(Rank::Ace, Suit::Hearts)))
        );
    }

    #[test]
    fn void_follower_may_trump_and_breaks_spades() {
        let mut round = constructed_round();
        round
            .play_card(PlayerPosition::South, c(Rank::Two, Suit::Hearts))
            .unwrap();
        round
            .play_card(PlayerPosition::West, c(Rank::King, Suit::Hearts))
            .unwrap();
        let outcome = round
            .play_card(PlayerPosition::North, c(Rank::Two, Suit::Spades))
            .unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::Played {
                next: PlayerPosition::East,
                broke_spades: true,
            }
        );
        assert!(round.spades_broken());
        let outcome = round
            .play_card(PlayerPosition::East, c(Rank::Ace, Suit::Hearts))
            .unwrap();
        assert_eq!(outcome, PlayOutcome::TrickReady { broke_spades: false });
        assert_eq!(round.expected_seat(), None);
        assert!(round.legal_cards(PlayerPosition::South).is_empty());

        let result = round.resolve_trick().unwrap();
        assert_eq!(result.winner, PlayerPosition::North);
        assert_eq!(round.tricks_taken(PlayerPosition::North), 1);
        assert_eq!(round.team_tricks(Team::NorthSouth), 1);
        assert_eq!(round.memory().len(), 4);
        assert_eq!(round.current_trick().leader(), PlayerPosition::North);
        assert_eq!(round.tricks_completed(), 1);

        assert_eq!(
            round.legal_cards(PlayerPosition::North),
            vec![c(Rank::Five, Suit::Clubs)]
        );
    }

    #[test]
    fn resolve_is_noop_until_trick_is_full() {
        let mut round = constructed_round();
        assert!(round.resolve_trick().is_none());
        round
            .play_card(PlayerPosition::South, c(Rank::Two, Suit::Hearts))
            .unwrap();
        assert!(round.resolve_trick().is_none());
        assert_eq!(round.current_trick().len(), 1);
    }

    #[test]
    fn broken_spades_allow_spade_lead() {
        let mut round = constructed_round();
        for (seat, card) in [
            (PlayerPosition::South, c(Rank::Two, Suit::Hearts)),
            (PlayerPosition::West, c(Rank::King, Suit::Hearts)),
            (PlayerPosition::North, c(Rank::Two, Suit::Spades)),
            (PlayerPosition::East, c(Rank::Ace, Suit::Hearts)),
        ] {
            round.play_card(seat, card).unwrap();
        }
        round.resolve_trick();
        round
            .play_card(PlayerPosition::North, c(Rank::Five, Suit::Clubs))
            .unwrap();
        round
            .play_card(PlayerPosition::East, c(Rank::Nine, Suit::Diamonds))
            .unwrap();
        round
            .play_card(PlayerPosition::South, c(Rank::Ace, Suit::Spades))
            .unwrap();
        round
            .play_card(PlayerPosition::West, c(Rank::Three, Suit::Clubs))
            .unwrap();
        let result = round.resolve_trick().unwrap();
        assert_eq!(result.winner, PlayerPosition::South);
        assert!(round.is_finished());
    }
}
