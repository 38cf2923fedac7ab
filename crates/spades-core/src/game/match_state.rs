use crate::game::serialization::MatchSnapshot;
use crate::model::card::Card;
use crate::model::deck::{DealError, Deck};
use crate::model::player::{Player, PlayerPosition, Team};
use crate::model::round::{PlayError, PlayOutcome, RoundState};
use crate::model::score::{GameOutcome, ScoreBoard, TeamHandScore};
use crate::model::trick::TrickResult;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{Level, event};

/// Where the sequencer stands between two calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    AwaitingDeal,
    AwaitingLead,
    /// Number of cards already in the trick (1 to 3).
    AwaitingFollow(u8),
    TrickComplete,
    HandComplete,
    GameComplete(GameOutcome),
}

/// Result of a legal card play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickUpdate {
    pub seat: PlayerPosition,
    pub card: Card,
    /// Seat to act next, `None` once the trick holds four cards.
    pub next: Option<PlayerPosition>,
    pub trick_complete: bool,
    pub broke_spades: bool,
}

/// End-of-deal score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub deal_number: u32,
    pub teams: [TeamHandScore; 2],
    pub outcome: Option<GameOutcome>,
}

impl ScoreUpdate {
    pub fn team(&self, team: Team) -> &TeamHandScore {
        &self.teams[team.index()]
    }

    pub fn game_over(&self) -> bool {
        self.outcome.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    DealInProgress,
    GameComplete(GameOutcome),
    Deal(DealError),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::DealInProgress => write!(f, "the current deal has not been scored"),
            MatchError::GameComplete(outcome) => write!(f, "game already decided: {outcome:?}"),
            MatchError::Deal(err) => write!(f, "deal failed: {err}"),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Deal(err) => Some(err),
            _ => None,
        }
    }
}

/// A full game: players, running scores and the deal in progress.
#[derive(Debug, Clone)]
pub struct MatchState {
    players: [Player; 4],
    scores: ScoreBoard,
    round: Option<RoundState>,
    rng: StdRng,
    seed: u64,
    deal_number: u32,
    seeds_drawn: u32,
    next_leader: Option<PlayerPosition>,
    outcome: Option<GameOutcome>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_players(seed, Player::default_table())
    }

    pub fn with_players(seed: u64, players: [Player; 4]) -> Self {
        Self {
            players,
            scores: ScoreBoard::new(),
            round: None,
            rng: StdRng::seed_from_u64(seed),
            seed,
            deal_number: 0,
            seeds_drawn: 0,
            next_leader: None,
            outcome: None,
        }
    }

    /// Rebuilds a match between deals. The match RNG is advanced past the
    /// seeds already drawn, so `deal_next` continues the same sequence.
    pub fn from_snapshot(snapshot: &MatchSnapshot) -> Self {
        let mut state = Self::with_players(snapshot.seed, snapshot.players.clone());
        for _ in 0..snapshot.seeds_drawn {
            let _ = state.rng.next_u64();
        }
        state.scores = ScoreBoard::with_totals(snapshot.scores, snapshot.bags);
        state.deal_number = snapshot.deal_number;
        state.seeds_drawn = snapshot.seeds_drawn;
        state.next_leader = snapshot.next_leader;
        state.outcome = state.scores.outcome();
        state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn players(&self) -> &[Player; 4] {
        &self.players
    }

    pub fn player(&self, seat: PlayerPosition) -> &Player {
        &self.players[seat.index()]
    }

    pub fn set_player(&mut self, seat: PlayerPosition, player: Player) {
        self.players[seat.index()] = player;
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn deal_number(&self) -> u32 {
        self.deal_number
    }

    /// Deal seeds taken from the match RNG by `deal_next`.
    pub fn seeds_drawn(&self) -> u32 {
        self.seeds_drawn
    }

    /// Leader of the next deal, once a deal has finished.
    pub fn next_leader(&self) -> Option<PlayerPosition> {
        self.next_leader
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn phase(&self) -> MatchPhase {
        if let Some(outcome) = self.outcome {
            return MatchPhase::GameComplete(outcome);
        }
        let Some(round) = &self.round else {
            return MatchPhase::AwaitingDeal;
        };
        let trick = round.current_trick();
        if trick.is_complete() {
            MatchPhase::TrickComplete
        } else if round.is_finished() {
            MatchPhase::HandComplete
        } else if trick.is_empty() {
            MatchPhase::AwaitingLead
        } else {
            MatchPhase::AwaitingFollow(trick.len() as u8)
        }
    }

    /// Seat whose turn it is.
    pub fn current_seat(&self) -> Option<PlayerPosition> {
        if self.outcome.is_some() {
            return None;
        }
        self.round.as_ref().and_then(RoundState::expected_seat)
    }

    /// True when the seat to act needs a card from outside the engine.
    pub fn awaiting_human(&self) -> bool {
        self.current_seat()
            .is_some_and(|seat| self.player(seat).is_human())
    }

    pub fn legal_cards(&self, seat: PlayerPosition) -> Vec<Card> {
        self.round
            .as_ref()
            .map(|round| round.legal_cards(seat))
            .unwrap_or_default()
    }

    /// Shuffles with `seed` and deals four hands. The first deal of a game
    /// draws its leader from the same RNG; later deals are led by whoever
    /// won the previous deal's last trick.
    pub fn start_new_deal(&mut self, seed: u64) -> Result<&RoundState, MatchError> {
        if let Some(outcome) = self.outcome {
            return Err(MatchError::GameComplete(outcome));
        }
        if self.round.is_some() {
            return Err(MatchError::DealInProgress);
        }

        let mut deal_rng = StdRng::seed_from_u64(seed);
        let mut deck = Deck::shuffled(&mut deal_rng);
        let leader = match self.next_leader {
            Some(leader) => leader,
            None => PlayerPosition::LOOP[deal_rng.gen_range(0..PlayerPosition::LOOP.len())],
        };
        let round = RoundState::deal(&mut deck, leader).map_err(MatchError::Deal)?;
        self.deal_number += 1;

        event!(
            target: "spades_core::match",
            Level::DEBUG,
            deal = self.deal_number,
            seed,
            leader = %leader,
            bid_ns = round.team_bid(Team::NorthSouth),
            bid_ew = round.team_bid(Team::EastWest),
        );

        Ok(self.round.insert(round))
    }

    /// Deals with a seed drawn from the match RNG.
    pub fn deal_next(&mut self) -> Result<&RoundState, MatchError> {
        if let Some(outcome) = self.outcome {
            return Err(MatchError::GameComplete(outcome));
        }
        if self.round.is_some() {
            return Err(MatchError::DealInProgress);
        }
        let seed = self.rng.next_u64();
        self.seeds_drawn += 1;
        self.start_new_deal(seed)
    }

    pub fn play_card(
        &mut self,
        seat: PlayerPosition,
        card: Card,
    ) -> Result<TrickUpdate, PlayError> {
        if self.outcome.is_some() {
            return Err(PlayError::NotInPlayPhase);
        }
        let round = self.round.as_mut().ok_or(PlayError::NotInPlayPhase)?;
        let update = match round.play_card(seat, card)? {
            PlayOutcome::Played { next, broke_spades } => TrickUpdate {
                seat,
                card,
                next: Some(next),
                trick_complete: false,
                broke_spades,
            },
            PlayOutcome::TrickReady { broke_spades } => TrickUpdate {
                seat,
                card,
                next: None,
                trick_complete: true,
                broke_spades,
            },
        };
        Ok(update)
    }

    pub fn resolve_trick_if_complete(&mut self) -> Option<TrickResult> {
        let round = self.round.as_mut()?;
        let result = round.resolve_trick()?;
        if round.is_finished() {
            self.next_leader = Some(result.winner);
        }
        Some(result)
    }

    /// Scores a finished deal and checks for the end of the game. The deal is
    /// dropped afterwards; the next call must be a new deal.
    pub fn score_hand_if_complete(&mut self) -> Option<ScoreUpdate> {
        if !self.round.as_ref()?.is_finished() {
            return None;
        }
        let round = self.round.take()?;

        let bids = Team::BOTH.map(|team| round.team_bid(team));
        let taken = Team::BOTH.map(|team| round.team_tricks(team));
        let teams = self.scores.apply_hand(bids, taken);
        self.outcome = self.scores.outcome();

        for line in &teams {
            event!(
                target: "spades_core::match",
                Level::INFO,
                deal = self.deal_number,
                team = %line.team,
                bid = line.bid,
                taken = line.taken,
                points = line.points,
                sandbags = line.sandbags,
                bag_penalty = line.bag_penalty,
                total = line.total_score,
            );
        }
        if let Some(outcome) = self.outcome {
            event!(
                target: "spades_core::match",
                Level::INFO,
                deal = self.deal_number,
                outcome = ?outcome,
                score_ns = self.scores.score(Team::NorthSouth),
                score_ew = self.scores.score(Team::EastWest),
                "game complete"
            );
        }

        Some(ScoreUpdate {
            deal_number: self.deal_number,
            teams,
            outcome: self.outcome,
        })
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
