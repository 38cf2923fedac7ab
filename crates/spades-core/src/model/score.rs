use crate::model::hand::Hand;
use crate::model::player::Team;
use serde::{Deserialize, Serialize};

pub const TARGET_SCORE: i32 = 500;
pub const SANDBAG_LIMIT: u32 = 10;
pub const SANDBAG_PENALTY: i32 = 100;

/// Forced bid: the number of spades dealt to the player.
pub fn bid_for(hand: &Hand) -> u8 {
    hand.spade_count() as u8
}

/// Points for one team in one deal.
pub fn hand_points(bid: u8, taken: u8) -> i32 {
    let bid_value = 10 * i32::from(bid);
    if taken < bid {
        -bid_value
    } else {
        bid_value + i32::from(taken - bid)
    }
}

pub fn sandbags(bid: u8, taken: u8) -> u32 {
    u32::from(taken.saturating_sub(bid))
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Winner(Team),
    /// Both teams reached the target on the same deal with equal scores.
    Draw,
}

/// Decides the game from end-of-deal totals, indexed by `Team::index`.
pub fn game_outcome(scores: [i32; 2]) -> Option<GameOutcome> {
    let [ns, ew] = scores;
    match (ns >= TARGET_SCORE, ew >= TARGET_SCORE) {
        (false, false) => None,
        (true, false) => Some(GameOutcome::Winner(Team::NorthSouth)),
        (false, true) => Some(GameOutcome::Winner(Team::EastWest)),
        (true, true) => Some(match ns.cmp(&ew) {
            std::cmp::Ordering::Greater => GameOutcome::Winner(Team::NorthSouth),
            std::cmp::Ordering::Less => GameOutcome::Winner(Team::EastWest),
            std::cmp::Ordering::Equal => GameOutcome::Draw,
        }),
    }
}

/// One team's line of the end-of-deal score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamHandScore {
    pub team: Team,
    pub bid: u8,
    pub taken: u8,
    pub sandbags: u32,
    pub total_bags: u32,
    pub bag_penalty: bool,
    pub points: i32,
    pub total_score: i32,
}

/// Running team totals carried from deal to deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    scores: [i32; 2],
    bags: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self {
            scores: [0; 2],
            bags: [0; 2],
        }
    }

    pub const fn with_totals(scores: [i32; 2], bags: [u32; 2]) -> Self {
        Self { scores, bags }
    }

    pub fn score(&self, team: Team) -> i32 {
        self.scores[team.index()]
    }

    pub fn bags(&self, team: Team) -> u32 {
        self.bags[team.index()]
    }

    pub fn scores(&self) -> [i32; 2] {
        self.scores
    }

    pub fn all_bags(&self) -> [u32; 2] {
        self.bags
    }

    /// Applies one team's deal. Reaching the bag limit costs 100 points and
    /// clears the counter to zero.
    pub fn apply_team(&mut self, team: Team, bid: u8, taken: u8) -> TeamHandScore {
        let idx = team.index();
        let bags_now = sandbags(bid, taken);
        self.bags[idx] += bags_now;
        let bag_penalty = self.bags[idx] >= SANDBAG_LIMIT;
        if bag_penalty {
            self.scores[idx] -= SANDBAG_PENALTY;
            self.bags[idx] = 0;
        }
        let points = hand_points(bid, taken);
        self.scores[idx] += points;

        TeamHandScore {
            team,
            bid,
            taken,
            sandbags: bags_now,
            total_bags: self.bags[idx],
            bag_penalty,
            points,
            total_score: self.scores[idx],
        }
    }

    /// Applies a full deal. Inputs are indexed by `Team::index`.
    pub fn apply_hand(&mut self, bids: [u8; 2], taken: [u8; 2]) -> [TeamHandScore; 2] {
        Team::BOTH.map(|team| self.apply_team(team, bids[team.index()], taken[team.index()]))
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        game_outcome(self.scores)
    }
}
