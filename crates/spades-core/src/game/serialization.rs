use super::match_state::MatchState;
use crate::model::player::{Player, PlayerPosition};
use serde::{Deserialize, Serialize};

/// State carried from one deal to the next: totals, bags, whose lead it is
/// and who sits where. Captured between deals; a deal in progress is not
/// part of the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    pub seed: u64,
    pub deal_number: u32,
    /// Deal seeds already drawn from the match RNG. Lower than
    /// `deal_number` when some deals were started with an explicit seed.
    pub seeds_drawn: u32,
    pub scores: [i32; 2],
    pub bags: [u32; 2],
    pub next_leader: Option<PlayerPosition>,
    pub players: [Player; 4],
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        MatchSnapshot {
            seed: state.seed(),
            deal_number: state.deal_number(),
            seeds_drawn: state.seeds_drawn(),
            scores: state.scores().scores(),
            bags: state.scores().all_bags(),
            next_leader: state.next_leader(),
            players: state.players().clone(),
        }
    }

    pub fn restore(self) -> MatchState {
        MatchState::from_snapshot(&self)
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
