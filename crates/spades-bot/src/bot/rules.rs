use super::BotContext;
use spades_core::model::card::Card;
use spades_core::model::rank::Rank;
use spades_core::model::suit::Suit;

/// One row of a decision table. `pick` proposes a card when its condition
/// holds; the planner keeps the proposal only if the card is legal.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub pick: fn(&BotContext<'_>) -> Option<Card>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Table for the given number of cards already in the trick.
pub fn rules_for(played: usize) -> &'static [Rule] {
    match played {
        0 => LEAD_RULES,
        1 => SECOND_RULES,
        2 => THIRD_RULES,
        _ => LAST_RULES,
    }
}

pub const LEAD_RULES: &[Rule] = &[
    Rule {
        name: "lead_plain_ace",
        pick: lead_plain_ace,
    },
    Rule {
        name: "lead_king_after_ace",
        pick: lead_king_after_ace,
    },
    Rule {
        name: "lead_queen_after_ace_king",
        pick: lead_queen_after_ace_king,
    },
    Rule {
        name: "lead_lowest_plain",
        pick: lead_lowest_plain,
    },
    Rule {
        name: "lead_lowest_spade",
        pick: lowest_spade,
    },
];

pub const SECOND_RULES: &[Rule] = &[
    Rule {
        name: "second_lead_ace",
        pick: second_lead_ace,
    },
    Rule {
        name: "second_beat_lead",
        pick: second_beat_lead,
    },
    Rule {
        name: "second_low_lead",
        pick: lowest_of_lead,
    },
    Rule {
        name: "second_low_spade",
        pick: lowest_spade,
    },
];

pub const THIRD_RULES: &[Rule] = &[
    Rule {
        name: "third_duck_offsuit_second",
        pick: third_duck_offsuit_second,
    },
    Rule {
        name: "third_cash_top",
        pick: third_cash_top,
    },
    Rule {
        name: "third_beat_lead",
        pick: beat_lead_winner,
    },
    Rule {
        name: "third_low_lead",
        pick: lowest_of_lead,
    },
    Rule {
        name: "third_overtrump",
        pick: overtrump,
    },
    Rule {
        name: "third_low_spade",
        pick: lowest_spade,
    },
    Rule {
        name: "third_low_club_heart",
        pick: third_low_club_heart,
    },
    Rule {
        name: "third_club_heart_ace",
        pick: third_club_heart_ace,
    },
    Rule {
        name: "third_low_diamond",
        pick: third_low_diamond,
    },
];

pub const LAST_RULES: &[Rule] = &[
    Rule {
        name: "last_partner_low_lead",
        pick: last_partner_low_lead,
    },
    Rule {
        name: "last_partner_discard",
        pick: last_partner_discard,
    },
    Rule {
        name: "last_partner_low_any",
        pick: last_partner_low_any,
    },
    Rule {
        name: "last_beat_lead",
        pick: beat_lead_winner,
    },
    Rule {
        name: "last_trump",
        pick: last_trump,
    },
    Rule {
        name: "last_low_discard",
        pick: last_low_discard,
    },
    Rule {
        name: "last_low_any",
        pick: lowest_any,
    },
];

fn lead_plain_ace(ctx: &BotContext<'_>) -> Option<Card> {
    [Suit::Clubs, Suit::Hearts, Suit::Diamonds]
        .into_iter()
        .find_map(|suit| ctx.legal_card(Rank::Ace, suit))
}

fn lead_king_after_ace(ctx: &BotContext<'_>) -> Option<Card> {
    [Suit::Clubs, Suit::Hearts, Suit::Diamonds]
        .into_iter()
        .filter(|suit| ctx.seen(Rank::Ace, *suit))
        .find_map(|suit| ctx.legal_card(Rank::King, suit))
}

fn lead_queen_after_ace_king(ctx: &BotContext<'_>) -> Option<Card> {
    [Suit::Diamonds, Suit::Hearts, Suit::Clubs]
        .into_iter()
        .filter(|suit| ctx.seen(Rank::Ace, *suit) && ctx.seen(Rank::King, *suit))
        .find_map(|suit| ctx.legal_card(Rank::Queen, suit))
}

/// Ranks Two through King, weakest first.
const NON_ACE: &[Rank] = &[
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

/// Walks `ranks` in order and, at each rank, `suits` in order. A lower rank
/// in a later suit wins over a higher rank in an earlier one.
fn lowest_rank_first(ctx: &BotContext<'_>, suits: &[Suit], ranks: &[Rank]) -> Option<Card> {
    ranks.iter().find_map(|rank| {
        suits
            .iter()
            .find_map(|suit| ctx.legal_card(*rank, *suit))
    })
}

/// Lowest rank first; at equal rank Diamonds, then Hearts, then Clubs.
fn lead_lowest_plain(ctx: &BotContext<'_>) -> Option<Card> {
    lowest_rank_first(ctx, &[Suit::Diamonds, Suit::Hearts, Suit::Clubs], &Rank::ORDERED)
}

fn lowest_spade(ctx: &BotContext<'_>) -> Option<Card> {
    ctx.lowest_in(Suit::Spades)
}

fn lowest_of_lead(ctx: &BotContext<'_>) -> Option<Card> {
    ctx.lowest_in(ctx.lead_suit()?)
}

fn lowest_any(ctx: &BotContext<'_>) -> Option<Card> {
    ctx.lowest_legal()
}

fn second_lead_ace(ctx: &BotContext<'_>) -> Option<Card> {
    ctx.legal_card(Rank::Ace, ctx.lead_suit()?)
}

fn second_beat_lead(ctx: &BotContext<'_>) -> Option<Card> {
    let led = ctx.trick.plays().first()?.card;
    ctx.lowest_beating_in(led.suit, led)
}

/// The second hand left the lead suit, so follow as low as possible.
fn third_duck_offsuit_second(ctx: &BotContext<'_>) -> Option<Card> {
    let lead = ctx.lead_suit()?;
    let second = ctx.trick.plays().get(1)?.card;
    if second.suit == lead {
        return None;
    }
    ctx.lowest_in(lead)
}

/// Top-down cashing: a card is safe once every higher card of its suit has
/// been seen in an earlier trick.
fn third_cash_top(ctx: &BotContext<'_>) -> Option<Card> {
    let lead = ctx.lead_suit()?;
    let winner = ctx.winning()?.card;
    if winner.suit != lead {
        return None;
    }
    const LADDER: [(Rank, Option<Rank>); 5] = [
        (Rank::Ace, None),
        (Rank::King, Some(Rank::Ace)),
        (Rank::Queen, Some(Rank::King)),
        (Rank::Jack, Some(Rank::Queen)),
        (Rank::Ten, Some(Rank::Jack)),
    ];
    LADDER.into_iter().find_map(|(rank, gone)| {
        if gone.is_some_and(|above| !ctx.seen(above, lead)) {
            return None;
        }
        ctx.legal_card(rank, lead)
            .filter(|card| card.beats(&winner, lead))
    })
}

fn beat_lead_winner(ctx: &BotContext<'_>) -> Option<Card> {
    let lead = ctx.lead_suit()?;
    let winner = ctx.winning()?.card;
    if winner.suit != lead {
        return None;
    }
    ctx.lowest_beating_in(lead, winner)
}

fn overtrump(ctx: &BotContext<'_>) -> Option<Card> {
    let winner = ctx.winning()?.card;
    if !winner.is_spade() {
        return None;
    }
    ctx.lowest_beating_in(Suit::Spades, winner)
}

fn third_low_club_heart(ctx: &BotContext<'_>) -> Option<Card> {
    lowest_rank_first(ctx, &[Suit::Clubs, Suit::Hearts], NON_ACE)
}

fn third_club_heart_ace(ctx: &BotContext<'_>) -> Option<Card> {
    [Suit::Clubs, Suit::Hearts]
        .into_iter()
        .find_map(|suit| ctx.legal_card(Rank::Ace, suit))
}

fn third_low_diamond(ctx: &BotContext<'_>) -> Option<Card> {
    ctx.lowest_in(Suit::Diamonds)
}

fn last_partner_low_lead(ctx: &BotContext<'_>) -> Option<Card> {
    if !ctx.partner_winning() {
        return None;
    }
    lowest_of_lead(ctx)
}

fn last_partner_discard(ctx: &BotContext<'_>) -> Option<Card> {
    if !ctx.partner_winning() {
        return None;
    }
    lowest_rank_first(ctx, &[Suit::Hearts, Suit::Diamonds, Suit::Clubs], NON_ACE).or_else(|| {
        [Suit::Hearts, Suit::Clubs, Suit::Diamonds]
            .into_iter()
            .find_map(|suit| ctx.legal_card(Rank::Ace, suit))
    })
}

fn last_partner_low_any(ctx: &BotContext<'_>) -> Option<Card> {
    if !ctx.partner_winning() {
        return None;
    }
    ctx.lowest_legal()
}

/// Lowest spade that takes the trick, whether the winner is a lead-suit card
/// or a lower spade.
fn last_trump(ctx: &BotContext<'_>) -> Option<Card> {
    let winner = ctx.winning()?.card;
    ctx.lowest_beating_in(Suit::Spades, winner)
}

/// Aces come last: `Rank::ORDERED` ends with the Ace.
fn last_low_discard(ctx: &BotContext<'_>) -> Option<Card> {
    lowest_rank_first(ctx, &[Suit::Hearts, Suit::Clubs, Suit::Diamonds], &Rank::ORDERED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::PlayPlanner;
    use spades_core::model::hand::Hand;
    use spades_core::model::memory::Memory;
    use spades_core::model::player::PlayerPosition;
    use spades_core::model::round::legal_cards;
    use spades_core::model::trick::Trick;

    struct Fixture {
        seat: PlayerPosition,
        hand: Hand,
        trick: Trick,
        memory: Memory,
        legal: Vec<Card>,
    }

    impl Fixture {
        /// South to act after `plays`, which start with the seat that many
        /// places to its right.
        fn new(hand: &[Card], plays: &[Card], memory: &[Card], spades_broken: bool) -> Self {
            let seat = PlayerPosition::South;
            let mut leader = seat;
            for _ in 0..plays.len() {
                leader = leader.previous();
            }
            let mut trick = Trick::new(leader);
            let mut position = leader;
            for card in plays {
                trick.play(position, *card).unwrap();
                position = position.next();
            }
            let hand = Hand::with_cards(hand.to_vec());
            let legal = legal_cards(&hand, &trick, spades_broken);
            Self {
                seat,
                hand,
                trick,
                memory: Memory::with_cards(memory.to_vec()),
                legal,
            }
        }

        fn ctx(&self) -> BotContext<'_> {
            BotContext::new(self.seat, &self.hand, &self.trick, &self.memory, &self.legal)
        }

        fn decide(&self) -> (Card, &'static str) {
            let decision = PlayPlanner::choose(&self.ctx()).unwrap();
            (decision.card, decision.rule)
        }
    }

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn tables_match_trick_position() {
        assert_eq!(rules_for(0)[0].name, "lead_plain_ace");
        assert_eq!(rules_for(1)[0].name, "second_lead_ace");
        assert_eq!(rules_for(2)[0].name, "third_duck_offsuit_second");
        assert_eq!(rules_for(3)[0].name, "last_partner_low_lead");
    }

    #[test]
    fn lead_prefers_heart_ace_when_no_club_ace() {
        let f = Fixture::new(
            &[
                c(Rank::Ace, Suit::Diamonds),
                c(Rank::Ace, Suit::Hearts),
                c(Rank::Five, Suit::Clubs),
                c(Rank::Three, Suit::Spades),
            ],
            &[],
            &[],
            false,
        );
        assert_eq!(f.decide(), (c(Rank::Ace, Suit::Hearts), "lead_plain_ace"));
    }

    #[test]
    fn lead_king_once_ace_is_gone() {
        let f = Fixture::new(
            &[
                c(Rank::King, Suit::Diamonds),
                c(Rank::King, Suit::Hearts),
                c(Rank::Four, Suit::Clubs),
            ],
            &[],
            &[c(Rank::Ace, Suit::Diamonds)],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::King, Suit::Diamonds), "lead_king_after_ace")
        );
    }

    #[test]
    fn lead_queen_once_ace_and_king_are_gone() {
        let f = Fixture::new(
            &[c(Rank::Queen, Suit::Hearts), c(Rank::Seven, Suit::Clubs)],
            &[],
            &[c(Rank::Ace, Suit::Hearts), c(Rank::King, Suit::Hearts)],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Queen, Suit::Hearts), "lead_queen_after_ace_king")
        );
        assert_eq!(lead_king_after_ace(&f.ctx()), None);
    }

    #[test]
    fn lead_lowest_plain_breaks_rank_ties_by_suit() {
        let f = Fixture::new(
            &[
                c(Rank::Two, Suit::Hearts),
                c(Rank::Two, Suit::Diamonds),
                c(Rank::Five, Suit::Clubs),
                c(Rank::Nine, Suit::Spades),
            ],
            &[],
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Two, Suit::Diamonds), "lead_lowest_plain")
        );
    }

    #[test]
    fn lead_spade_only_when_hand_is_all_spades() {
        let f = Fixture::new(
            &[c(Rank::Nine, Suit::Spades), c(Rank::Three, Suit::Spades)],
            &[],
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Three, Suit::Spades), "lead_lowest_spade")
        );
    }

    #[test]
    fn lead_never_proposes_unbroken_spade() {
        let f = Fixture::new(
            &[c(Rank::Ace, Suit::Spades), c(Rank::King, Suit::Hearts)],
            &[],
            &[],
            false,
        );
        assert_eq!(lowest_spade(&f.ctx()), None);
        assert_eq!(f.decide(), (c(Rank::King, Suit::Hearts), "lead_lowest_plain"));
    }

    #[test]
    fn second_hand_rules_in_order() {
        let led = [c(Rank::Ten, Suit::Hearts)];

        let ace = Fixture::new(
            &[
                c(Rank::Ace, Suit::Hearts),
                c(Rank::Four, Suit::Hearts),
                c(Rank::King, Suit::Spades),
            ],
            &led,
            &[],
            false,
        );
        assert_eq!(ace.decide(), (c(Rank::Ace, Suit::Hearts), "second_lead_ace"));

        let beat = Fixture::new(
            &[
                c(Rank::Queen, Suit::Hearts),
                c(Rank::Jack, Suit::Hearts),
                c(Rank::Four, Suit::Hearts),
            ],
            &led,
            &[],
            false,
        );
        assert_eq!(beat.decide(), (c(Rank::Jack, Suit::Hearts), "second_beat_lead"));

        let low = Fixture::new(
            &[c(Rank::Nine, Suit::Hearts), c(Rank::Four, Suit::Hearts)],
            &led,
            &[],
            false,
        );
        assert_eq!(low.decide(), (c(Rank::Four, Suit::Hearts), "second_low_lead"));

        let trump = Fixture::new(
            &[
                c(Rank::King, Suit::Spades),
                c(Rank::Three, Suit::Spades),
                c(Rank::Five, Suit::Clubs),
            ],
            &led,
            &[],
            false,
        );
        assert_eq!(
            trump.decide(),
            (c(Rank::Three, Suit::Spades), "second_low_spade")
        );
    }

    #[test]
    fn second_hand_without_options_falls_back_to_first_legal() {
        let f = Fixture::new(
            &[c(Rank::Seven, Suit::Diamonds), c(Rank::Five, Suit::Clubs)],
            &[c(Rank::Ten, Suit::Hearts)],
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Seven, Suit::Diamonds), crate::bot::FALLBACK_RULE)
        );
    }

    #[test]
    fn third_hand_ducks_when_second_left_the_suit() {
        let f = Fixture::new(
            &[c(Rank::Ace, Suit::Hearts), c(Rank::Two, Suit::Hearts)],
            &[c(Rank::Ten, Suit::Hearts), c(Rank::Three, Suit::Clubs)],
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Two, Suit::Hearts), "third_duck_offsuit_second")
        );
    }

    #[test]
    fn third_hand_cashes_king_after_ace_seen() {
        let f = Fixture::new(
            &[c(Rank::King, Suit::Diamonds), c(Rank::Three, Suit::Diamonds)],
            &[c(Rank::Five, Suit::Diamonds), c(Rank::Nine, Suit::Diamonds)],
            &[c(Rank::Ace, Suit::Diamonds)],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::King, Suit::Diamonds), "third_cash_top")
        );
    }

    #[test]
    fn third_hand_beats_with_lowest_sufficient_card() {
        let f = Fixture::new(
            &[
                c(Rank::Queen, Suit::Diamonds),
                c(Rank::Ten, Suit::Diamonds),
                c(Rank::Three, Suit::Diamonds),
            ],
            &[c(Rank::Five, Suit::Diamonds), c(Rank::Nine, Suit::Diamonds)],
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Ten, Suit::Diamonds), "third_beat_lead")
        );
    }

    #[test]
    fn third_hand_overtrumps_when_void() {
        let f = Fixture::new(
            &[
                c(Rank::Six, Suit::Spades),
                c(Rank::Two, Suit::Spades),
                c(Rank::Eight, Suit::Hearts),
            ],
            &[c(Rank::Five, Suit::Diamonds), c(Rank::Four, Suit::Spades)],
            &[],
            true,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Six, Suit::Spades), "third_overtrump")
        );
    }

    #[test]
    fn third_hand_discards_low_club_before_heart() {
        let f = Fixture::new(
            &[
                c(Rank::Ace, Suit::Clubs),
                c(Rank::Four, Suit::Clubs),
                c(Rank::Six, Suit::Hearts),
            ],
            &[c(Rank::Five, Suit::Diamonds), c(Rank::Nine, Suit::Diamonds)],
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Four, Suit::Clubs), "third_low_club_heart")
        );
    }

    #[test]
    fn third_hand_discards_lowest_rank_across_clubs_and_hearts() {
        let f = Fixture::new(
            &[c(Rank::King, Suit::Clubs), c(Rank::Two, Suit::Hearts)],
            &[c(Rank::Five, Suit::Diamonds), c(Rank::Nine, Suit::Diamonds)],
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Two, Suit::Hearts), "third_low_club_heart")
        );

        let tie = Fixture::new(
            &[c(Rank::Seven, Suit::Hearts), c(Rank::Seven, Suit::Clubs)],
            &[c(Rank::Five, Suit::Diamonds), c(Rank::Nine, Suit::Diamonds)],
            &[],
            false,
        );
        assert_eq!(
            tie.decide(),
            (c(Rank::Seven, Suit::Clubs), "third_low_club_heart")
        );
    }

    #[test]
    fn third_hand_cashes_plain_ace_before_diamonds() {
        let f = Fixture::new(
            &[c(Rank::Ace, Suit::Hearts), c(Rank::Three, Suit::Diamonds)],
            &[c(Rank::Five, Suit::Clubs), c(Rank::Nine, Suit::Clubs)],
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Ace, Suit::Hearts), "third_club_heart_ace")
        );
    }

    #[test]
    fn last_hand_lets_partner_win() {
        let f = Fixture::new(
            &[c(Rank::Ace, Suit::Clubs), c(Rank::Three, Suit::Clubs)],
            &[
                c(Rank::Ten, Suit::Clubs),
                c(Rank::King, Suit::Clubs),
                c(Rank::Two, Suit::Clubs),
            ],
            &[],
            false,
        );
        assert!(f.ctx().partner_winning());
        assert_eq!(
            f.decide(),
            (c(Rank::Three, Suit::Clubs), "last_partner_low_lead")
        );
    }

    #[test]
    fn last_hand_discards_lowest_rank_under_winning_partner() {
        let partner_leads = [
            c(Rank::Ten, Suit::Clubs),
            c(Rank::King, Suit::Clubs),
            c(Rank::Two, Suit::Clubs),
        ];
        let f = Fixture::new(
            &[
                c(Rank::Two, Suit::Spades),
                c(Rank::Eight, Suit::Hearts),
                c(Rank::Four, Suit::Diamonds),
            ],
            &partner_leads,
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Four, Suit::Diamonds), "last_partner_discard")
        );

        let low_diamond = Fixture::new(
            &[c(Rank::Nine, Suit::Hearts), c(Rank::Two, Suit::Diamonds)],
            &partner_leads,
            &[],
            false,
        );
        assert_eq!(
            low_diamond.decide(),
            (c(Rank::Two, Suit::Diamonds), "last_partner_discard")
        );

        let tie = Fixture::new(
            &[c(Rank::Six, Suit::Diamonds), c(Rank::Six, Suit::Hearts)],
            &partner_leads,
            &[],
            false,
        );
        assert_eq!(tie.decide(), (c(Rank::Six, Suit::Hearts), "last_partner_discard"));
    }

    #[test]
    fn last_hand_under_partner_keeps_aces_until_plain_cards_run_out() {
        let partner_leads = [
            c(Rank::Ten, Suit::Clubs),
            c(Rank::King, Suit::Clubs),
            c(Rank::Two, Suit::Clubs),
        ];
        let king = Fixture::new(
            &[c(Rank::Ace, Suit::Hearts), c(Rank::King, Suit::Diamonds)],
            &partner_leads,
            &[],
            false,
        );
        assert_eq!(
            king.decide(),
            (c(Rank::King, Suit::Diamonds), "last_partner_discard")
        );

        let aces = Fixture::new(
            &[c(Rank::Ace, Suit::Diamonds), c(Rank::Ace, Suit::Hearts)],
            &partner_leads,
            &[],
            false,
        );
        assert_eq!(
            aces.decide(),
            (c(Rank::Ace, Suit::Hearts), "last_partner_discard")
        );
    }

    #[test]
    fn last_hand_beats_opponent_cheaply() {
        let f = Fixture::new(
            &[
                c(Rank::Ace, Suit::Clubs),
                c(Rank::King, Suit::Clubs),
                c(Rank::Four, Suit::Clubs),
            ],
            &[
                c(Rank::Ten, Suit::Clubs),
                c(Rank::Three, Suit::Clubs),
                c(Rank::Queen, Suit::Clubs),
            ],
            &[],
            false,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::King, Suit::Clubs), "last_beat_lead")
        );
    }

    #[test]
    fn last_hand_trumps_or_overtrumps() {
        let trump = Fixture::new(
            &[
                c(Rank::Five, Suit::Spades),
                c(Rank::Two, Suit::Spades),
                c(Rank::Nine, Suit::Hearts),
            ],
            &[
                c(Rank::Ten, Suit::Clubs),
                c(Rank::Three, Suit::Clubs),
                c(Rank::Queen, Suit::Clubs),
            ],
            &[],
            false,
        );
        assert_eq!(trump.decide(), (c(Rank::Two, Suit::Spades), "last_trump"));

        let over = Fixture::new(
            &[
                c(Rank::Five, Suit::Spades),
                c(Rank::Queen, Suit::Spades),
                c(Rank::Seven, Suit::Hearts),
            ],
            &[
                c(Rank::Ten, Suit::Clubs),
                c(Rank::Three, Suit::Clubs),
                c(Rank::Nine, Suit::Spades),
            ],
            &[],
            true,
        );
        assert_eq!(over.decide(), (c(Rank::Queen, Suit::Spades), "last_trump"));
    }

    #[test]
    fn last_hand_discards_when_trick_is_lost() {
        let f = Fixture::new(
            &[
                c(Rank::Five, Suit::Spades),
                c(Rank::Seven, Suit::Hearts),
                c(Rank::Two, Suit::Diamonds),
            ],
            &[
                c(Rank::Ten, Suit::Clubs),
                c(Rank::Three, Suit::Clubs),
                c(Rank::Ace, Suit::Spades),
            ],
            &[],
            true,
        );
        assert_eq!(
            f.decide(),
            (c(Rank::Two, Suit::Diamonds), "last_low_discard")
        );
    }

    #[test]
    fn last_hand_discard_prefers_lower_rank_over_suit_order() {
        let lost = [
            c(Rank::Ten, Suit::Diamonds),
            c(Rank::Three, Suit::Diamonds),
            c(Rank::Ace, Suit::Spades),
        ];
        let f = Fixture::new(
            &[c(Rank::King, Suit::Hearts), c(Rank::Two, Suit::Clubs)],
            &lost,
            &[],
            true,
        );
        assert_eq!(f.decide(), (c(Rank::Two, Suit::Clubs), "last_low_discard"));

        let ace_last = Fixture::new(
            &[c(Rank::Ace, Suit::Hearts), c(Rank::Queen, Suit::Clubs)],
            &lost,
            &[],
            true,
        );
        assert_eq!(
            ace_last.decide(),
            (c(Rank::Queen, Suit::Clubs), "last_low_discard")
        );
    }
}
