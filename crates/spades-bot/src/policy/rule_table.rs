use super::{Policy, PolicyContext};
use crate::bot::{BotContext, BotDifficulty, Decision, PlayPlanner};
use spades_core::model::card::Card;
use tracing::{Level, event};

/// Adapter that runs the decision tables through the `Policy` trait.
pub struct RuleTablePolicy {
    difficulty: BotDifficulty,
}

impl RuleTablePolicy {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self { difficulty }
    }

    pub fn easy() -> Self {
        Self::new(BotDifficulty::EasyLegacy)
    }

    pub fn normal() -> Self {
        Self::new(BotDifficulty::NormalRules)
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }

    /// Like `choose_play`, but also reports which rule fired.
    pub fn decide(&self, ctx: &PolicyContext) -> Option<Decision> {
        let legal = ctx.round.legal_cards(ctx.seat);
        let decision = match self.difficulty {
            BotDifficulty::EasyLegacy => legal.first().map(|card| Decision {
                card: *card,
                rule: "easy_first_legal",
            }),
            BotDifficulty::NormalRules => {
                let bot_ctx = BotContext::new(
                    ctx.seat,
                    ctx.hand,
                    ctx.round.current_trick(),
                    ctx.round.memory(),
                    &legal,
                );
                PlayPlanner::choose(&bot_ctx)
            }
        }?;
        log_play_decision(ctx, self.difficulty, &legal, decision);
        Some(decision)
    }
}

impl Policy for RuleTablePolicy {
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        self.decide(ctx).map(|decision| decision.card)
    }

    fn name(&self) -> &'static str {
        match self.difficulty {
            BotDifficulty::EasyLegacy => "rule_table_easy",
            BotDifficulty::NormalRules => "rule_table",
        }
    }
}

fn log_play_decision(
    ctx: &PolicyContext,
    difficulty: BotDifficulty,
    legal_moves: &[Card],
    decision: Decision,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let legal_preview = if legal_moves.len() <= 6 {
        legal_moves
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal_moves.len())
    };

    event!(
        target: "spades_bot::play",
        Level::INFO,
        seat = %ctx.seat,
        difficulty = difficulty.as_str(),
        rule = decision.rule,
        legal_count = legal_moves.len(),
        legal_moves = %legal_preview,
        chosen = %decision.card,
        spades_broken = ctx.round.spades_broken(),
        trick_cards = ctx.round.current_trick().len(),
    );
}
