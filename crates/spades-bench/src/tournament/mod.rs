mod permutations;

pub use permutations::SeatPermutations;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use spades_bot::bot::BotDifficulty;
use spades_bot::policy::{Policy, PolicyContext, RuleTablePolicy};
use spades_core::game::match_state::MatchState;
use spades_core::model::player::{PlayerPosition, Team};
use spades_core::model::score::GameOutcome;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{AgentConfig, AgentKind, BenchmarkConfig, ResolvedOutputs, ValidationError};
use crate::logging::TELEMETRY_FILE;

/// Plays full bot-only games and streams one JSONL row per seat per game.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    seat_permutations: SeatPermutations,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub permutations: usize,
    pub rows_written: usize,
    pub unfinished_games: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;

        if agents.len() != 4 {
            return Err(RunnerError::SeatCount {
                found: agents.len(),
            });
        }

        if config.games.permutations > SeatPermutations::MAX {
            return Err(RunnerError::PermutationLimit {
                requested: config.games.permutations,
                max: SeatPermutations::MAX,
            });
        }

        let seat_permutations = SeatPermutations::new(config.games.permutations);

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            agents,
            seat_permutations,
        })
    }

    /// Execute the tournament, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let permutations = self.seat_permutations.as_slice();
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut unfinished_games = 0usize;
        let mut analytics = AnalyticsCollector::new(&self.config);

        for game_index in 0..self.config.games.count {
            let base_seed = rng.next_u64();

            for (perm_index, perm) in permutations.iter().enumerate() {
                let outcome = self.play_game(game_index, perm_index, base_seed, perm)?;
                if outcome.outcome.is_none() {
                    unfinished_games += 1;
                }
                analytics.record_game(&outcome)?;
                rows_written += write_game_rows(
                    &mut writer,
                    &self.config,
                    game_index,
                    perm_index,
                    base_seed,
                    &outcome,
                )?;
            }
        }

        writer.flush()?;

        let summary = analytics.finalize();
        summary.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self
            .logging_enabled
            .then(|| self.outputs.artifacts_dir().join(TELEMETRY_FILE));

        Ok(RunSummary {
            games_played: self.config.games.count,
            permutations: permutations.len(),
            rows_written,
            unfinished_games,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }

    fn play_game(
        &self,
        game_index: usize,
        permutation_index: usize,
        base_seed: u64,
        permutation: &[usize; 4],
    ) -> Result<GameRecord, RunnerError> {
        let mut match_state = MatchState::with_seed(base_seed);
        let mut seats = build_seat_states(permutation, &self.agents)?;
        let mut bag_penalties = [0u32; 2];

        while match_state.outcome().is_none()
            && match_state.deal_number() < self.config.games.max_deals
        {
            match_state
                .deal_next()
                .map_err(|err| RunnerError::game(format!("deal failed: {err}")))?;

            while let Some(seat) = match_state.current_seat() {
                let seat_state = &mut seats[seat.index()];
                let card = {
                    let round = match_state
                        .round()
                        .ok_or_else(|| RunnerError::game("no deal in progress".to_string()))?;
                    let ctx = PolicyContext::new(seat, round);
                    let start = Instant::now();
                    let card = seat_state.policy.choose_play(&ctx);
                    let elapsed_ms = seat_state.metrics.record(start.elapsed());

                    if self.logging_enabled && tracing::enabled!(Level::INFO) {
                        event!(
                            target: "spades_bench::play",
                            Level::INFO,
                            run_id = %self.config.run_id,
                            game_index = game_index as u32,
                            permutation_index = permutation_index as u32,
                            deal = match_state.deal_number(),
                            seat = seat_label(seat),
                            agent = %seat_state.agent_name,
                            policy = seat_state.policy.name(),
                            card = ?card,
                            elapsed_ms
                        );
                    }

                    card.ok_or_else(|| {
                        RunnerError::game(format!(
                            "agent '{}' produced no card at {seat}",
                            seat_state.agent_name
                        ))
                    })?
                };

                let update = match_state.play_card(seat, card).map_err(|err| {
                    RunnerError::game(format!(
                        "invalid card play: {err} (seat: {seat}, card: {card})"
                    ))
                })?;
                if update.trick_complete {
                    match_state.resolve_trick_if_complete();
                }
            }

            let score = match_state
                .score_hand_if_complete()
                .ok_or_else(|| RunnerError::game("deal ended without a score".to_string()))?;
            for line in &score.teams {
                if line.bag_penalty {
                    bag_penalties[line.team.index()] += 1;
                }
            }
        }

        let final_scores = match_state.scores().scores();
        let outcome = match_state.outcome();
        let seating = seats
            .iter()
            .map(|seat| SeatSnapshot {
                seat: seat_label(seat.seat).to_string(),
                bot: seat.agent_name.clone(),
            })
            .collect();

        let seat_results = seats
            .into_iter()
            .map(|seat| {
                let team = seat.seat.team();
                SeatResult {
                    agent_name: seat.agent_name,
                    seat: seat.seat,
                    team,
                    team_score: final_scores[team.index()],
                    won: outcome == Some(GameOutcome::Winner(team)),
                    metrics: seat.metrics.finalize(),
                }
            })
            .collect();

        Ok(GameRecord {
            seating,
            seat_results,
            outcome,
            deals: match_state.deal_number(),
            final_scores,
            bag_penalties,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_rows(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    game_index: usize,
    permutation_index: usize,
    base_seed: u64,
    record: &GameRecord,
) -> Result<usize, RunnerError> {
    let game_id = format!("G{game_index:05}_P{permutation_index:02}");

    let mut rows_written = 0usize;
    for seat_result in &record.seat_results {
        let team = seat_result.team;
        let row = GameLogRow {
            run_id: config.run_id.clone(),
            game_id: game_id.clone(),
            game_index,
            permutation_index,
            game_seed: base_seed,
            seat: seat_label(seat_result.seat).to_string(),
            team: team_label(team).to_string(),
            bot: seat_result.agent_name.clone(),
            seating: record.seating.clone(),
            team_score: seat_result.team_score,
            opponent_score: record.final_scores[team.opponent().index()],
            won: seat_result.won,
            result: result_label(record.outcome, team).to_string(),
            deals: record.deals,
            bag_penalties: record.bag_penalties[team.index()],
            speed_ms_turn: seat_result.metrics.avg_ms_per_decision,
            decisions: seat_result.metrics.decisions,
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

fn build_seat_states(
    permutation: &[usize; 4],
    agents: &[AgentBlueprint],
) -> Result<Vec<SeatState>, RunnerError> {
    let mut seats = Vec::with_capacity(4);
    for (seat_idx, agent_idx) in permutation.iter().enumerate() {
        let seat = PlayerPosition::from_index(seat_idx).ok_or_else(|| {
            RunnerError::game(format!("invalid seat index generated: {}", seat_idx))
        })?;
        let agent = agents
            .get(*agent_idx)
            .ok_or(RunnerError::InvalidPermutation {
                index: seat_idx,
                agent_index: *agent_idx,
            })?;
        seats.push(SeatState::new(seat, agent));
    }
    Ok(seats)
}

fn seat_label(position: PlayerPosition) -> &'static str {
    match position {
        PlayerPosition::North => "north",
        PlayerPosition::East => "east",
        PlayerPosition::South => "south",
        PlayerPosition::West => "west",
    }
}

fn team_label(team: Team) -> &'static str {
    match team {
        Team::NorthSouth => "north_south",
        Team::EastWest => "east_west",
    }
}

fn result_label(outcome: Option<GameOutcome>, team: Team) -> &'static str {
    match outcome {
        Some(GameOutcome::Winner(winner)) if winner == team => "won",
        Some(GameOutcome::Winner(_)) => "lost",
        Some(GameOutcome::Draw) => "draw",
        None => "unfinished",
    }
}

struct SeatState {
    seat: PlayerPosition,
    agent_name: String,
    policy: Box<dyn Policy>,
    metrics: DecisionMetrics,
}

impl SeatState {
    fn new(seat: PlayerPosition, agent: &AgentBlueprint) -> Self {
        Self {
            seat,
            agent_name: agent.name.clone(),
            policy: agent.spawn_policy(),
            metrics: DecisionMetrics::default(),
        }
    }
}

/// Everything the runner learned from one full game.
pub struct GameRecord {
    pub seating: Vec<SeatSnapshot>,
    pub seat_results: Vec<SeatResult>,
    /// `None` when the deal cap was reached first.
    pub outcome: Option<GameOutcome>,
    pub deals: u32,
    pub final_scores: [i32; 2],
    pub bag_penalties: [u32; 2],
}

#[derive(Clone, Serialize)]
pub struct SeatSnapshot {
    pub seat: String,
    pub bot: String,
}

pub struct SeatResult {
    pub agent_name: String,
    pub seat: PlayerPosition,
    pub team: Team,
    pub team_score: i32,
    pub won: bool,
    pub metrics: DecisionSummary,
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration) -> f64 {
        self.total += duration;
        self.decisions += 1;
        duration.as_secs_f64() * 1000.0
    }

    fn finalize(self) -> DecisionSummary {
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            avg_ms_per_decision: avg_ms,
            total_ms: self.total.as_secs_f64() * 1000.0,
        }
    }
}

#[derive(Clone)]
pub struct DecisionSummary {
    pub decisions: u32,
    pub avg_ms_per_decision: f64,
    pub total_ms: f64,
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    permutation_index: usize,
    game_seed: u64,
    seat: String,
    team: String,
    bot: String,
    seating: Vec<SeatSnapshot>,
    team_score: i32,
    opponent_score: i32,
    won: bool,
    result: String,
    deals: u32,
    bag_penalties: u32,
    speed_ms_turn: f64,
    decisions: u32,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("configuration requires exactly 4 agents but found {found}")]
    SeatCount { found: usize },
    #[error("requested {requested} seat permutations exceeds maximum of {max}")]
    PermutationLimit { requested: usize, max: usize },
    #[error("permutation index {index} references invalid agent index {agent_index}")]
    InvalidPermutation { index: usize, agent_index: usize },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid parameters for agent '{name}': {source}")]
    InvalidParams {
        name: String,
        #[source]
        source: ValidationError,
    },
}

struct AgentBlueprint {
    name: String,
    implementation: AgentImplementation,
}

enum AgentImplementation {
    RuleTable { difficulty: BotDifficulty },
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, AgentError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let implementation = match config.kind {
            AgentKind::RuleTable => {
                let difficulty =
                    config
                        .difficulty()
                        .map_err(|source| AgentError::InvalidParams {
                            name: config.name.clone(),
                            source,
                        })?;
                AgentImplementation::RuleTable { difficulty }
            }
        };

        Ok(Self {
            name: config.name.clone(),
            implementation,
        })
    }

    fn spawn_policy(&self) -> Box<dyn Policy> {
        match &self.implementation {
            AgentImplementation::RuleTable { difficulty } => {
                Box::new(RuleTablePolicy::new(*difficulty))
            }
        }
    }
}
