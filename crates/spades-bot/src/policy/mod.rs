mod rule_table;

pub use rule_table::RuleTablePolicy;

use crate::bot::BotDifficulty;
use spades_core::game::match_state::MatchState;
use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::player::PlayerPosition;
use spades_core::model::round::RoundState;

/// What a policy sees when it is asked for a card.
pub struct PolicyContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub round: &'a RoundState,
}

impl<'a> PolicyContext<'a> {
    pub fn new(seat: PlayerPosition, round: &'a RoundState) -> Self {
        Self {
            seat,
            hand: round.hand(seat),
            round,
        }
    }
}

/// Card-choosing strategy for an automated seat.
pub trait Policy: Send {
    /// A card from the seat's legal set, or `None` if it has nothing to play.
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card>;

    fn name(&self) -> &'static str;
}

/// Picks a card for `seat` when it is that seat's turn. Difficulty comes
/// from `SPADES_BOT_DIFFICULTY`.
pub fn bot_choose(state: &MatchState, seat: PlayerPosition) -> Option<Card> {
    if state.current_seat() != Some(seat) {
        return None;
    }
    let round = state.round()?;
    let mut policy = RuleTablePolicy::new(BotDifficulty::from_env());
    policy.choose_play(&PolicyContext::new(seat, round))
}
