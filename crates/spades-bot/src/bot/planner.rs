use super::BotContext;
use super::rules::rules_for;
use spades_core::model::card::Card;
use tracing::{Level, event};

/// Name reported when no rule fires and the first legal card is played.
pub const FALLBACK_RULE: &str = "fallback_first_legal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub card: Card,
    pub rule: &'static str,
}

pub struct PlayPlanner;

impl PlayPlanner {
    /// Walks the table for the current trick position and returns the first
    /// legal proposal. `None` only when there is nothing legal to play.
    pub fn choose(ctx: &BotContext<'_>) -> Option<Decision> {
        let fallback = ctx.first_legal()?;
        let details = rule_logging_enabled();

        for rule in rules_for(ctx.played()) {
            let proposal = (rule.pick)(ctx).filter(|card| ctx.is_legal(*card));
            if details {
                event!(
                    target: "spades_bot::rules",
                    Level::DEBUG,
                    seat = %ctx.seat,
                    played = ctx.played(),
                    rule = rule.name,
                    proposal = ?proposal,
                );
            }
            if let Some(card) = proposal {
                return Some(Decision {
                    card,
                    rule: rule.name,
                });
            }
        }

        Some(Decision {
            card: fallback,
            rule: FALLBACK_RULE,
        })
    }
}

pub(crate) fn rule_logging_enabled() -> bool {
    std::env::var("SPADES_RULE_DETAILS")
        .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(false)
}
