mod planner;
mod rules;

pub use planner::{Decision, FALLBACK_RULE, PlayPlanner};
pub use rules::{LAST_RULES, LEAD_RULES, Rule, SECOND_RULES, THIRD_RULES, rules_for};

use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::memory::Memory;
use spades_core::model::player::PlayerPosition;
use spades_core::model::rank::Rank;
use spades_core::model::round::RoundState;
use spades_core::model::suit::Suit;
use spades_core::model::trick::{Play, Trick};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotDifficulty {
    /// First legal card in display order.
    EasyLegacy,
    #[default]
    NormalRules,
}

impl BotDifficulty {
    pub fn from_env() -> Self {
        static CACHED: OnceLock<BotDifficulty> = OnceLock::new();
        *CACHED.get_or_init(|| match std::env::var("SPADES_BOT_DIFFICULTY") {
            Ok(raw) => Self::parse(&raw).unwrap_or_default(),
            Err(_) => BotDifficulty::default(),
        })
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" | "legacy" => Some(BotDifficulty::EasyLegacy),
            "normal" | "default" => Some(BotDifficulty::NormalRules),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotDifficulty::EasyLegacy => "easy",
            BotDifficulty::NormalRules => "normal",
        }
    }
}

/// Everything a rule may look at: the bot's own hand, the trick so far, the
/// cards already gone this deal and the cards it may legally play.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub trick: &'a Trick,
    pub memory: &'a Memory,
    pub legal: &'a [Card],
}

impl<'a> BotContext<'a> {
    pub fn new(
        seat: PlayerPosition,
        hand: &'a Hand,
        trick: &'a Trick,
        memory: &'a Memory,
        legal: &'a [Card],
    ) -> Self {
        Self {
            seat,
            hand,
            trick,
            memory,
            legal,
        }
    }

    pub fn from_round(seat: PlayerPosition, round: &'a RoundState, legal: &'a [Card]) -> Self {
        Self::new(
            seat,
            round.hand(seat),
            round.current_trick(),
            round.memory(),
            legal,
        )
    }

    pub fn partner(&self) -> PlayerPosition {
        self.seat.partner()
    }

    /// Cards already in the current trick.
    pub fn played(&self) -> usize {
        self.trick.len()
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.trick.lead_suit()
    }

    /// Play currently holding the trick.
    pub fn winning(&self) -> Option<Play> {
        self.trick.best_play()
    }

    pub fn partner_winning(&self) -> bool {
        self.winning()
            .is_some_and(|play| play.position == self.partner())
    }

    pub fn is_legal(&self, card: Card) -> bool {
        self.legal.contains(&card)
    }

    /// `rank` of `suit` if it may be played now.
    pub fn legal_card(&self, rank: Rank, suit: Suit) -> Option<Card> {
        let card = Card::new(rank, suit);
        self.is_legal(card).then_some(card)
    }

    pub fn seen(&self, rank: Rank, suit: Suit) -> bool {
        self.memory.has_seen(rank, suit)
    }

    /// Weakest legal card of `suit`.
    pub fn lowest_in(&self, suit: Suit) -> Option<Card> {
        self.legal
            .iter()
            .copied()
            .filter(|card| card.suit == suit)
            .min_by_key(|card| card.rank.strength())
    }

    /// Weakest legal card of `suit` that would take over from `target`.
    pub fn lowest_beating_in(&self, suit: Suit, target: Card) -> Option<Card> {
        let lead = self.lead_suit()?;
        self.legal
            .iter()
            .copied()
            .filter(|card| card.suit == suit && card.beats(&target, lead))
            .min_by_key(|card| card.rank.strength())
    }

    pub fn lowest_legal(&self) -> Option<Card> {
        self.legal
            .iter()
            .copied()
            .min_by_key(|card| card.rank.strength())
    }

    pub fn first_legal(&self) -> Option<Card> {
        self.legal.first().copied()
    }
}
