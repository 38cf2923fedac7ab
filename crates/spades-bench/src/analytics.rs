use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use spades_core::model::score::GameOutcome;

use crate::config::{AgentConfig, AgentKind, BenchmarkConfig};
use crate::tournament::{DecisionSummary, GameRecord};

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("agent '{0}' defined in results but missing from configuration")]
    UnknownAgent(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Folds finished games into per-agent aggregates.
pub struct AnalyticsCollector {
    agents: HashMap<String, AgentAccumulator>,
    agent_order: Vec<String>,
    latency_budget_ms: u64,
    games: usize,
    unfinished_games: usize,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        let mut agents = HashMap::new();
        let mut order = Vec::new();
        for agent in &config.agents {
            agents.insert(
                agent.name.clone(),
                AgentAccumulator::new(agent.clone(), config.metrics.latency_budget_ms),
            );
            order.push(agent.name.clone());
        }

        Self {
            agents,
            agent_order: order,
            latency_budget_ms: config.metrics.latency_budget_ms,
            games: 0,
            unfinished_games: 0,
        }
    }

    pub fn record_game(&mut self, record: &GameRecord) -> Result<(), AnalyticsError> {
        self.games += 1;
        let finished = record.outcome.is_some();
        if !finished {
            self.unfinished_games += 1;
        }
        let draw = record.outcome == Some(GameOutcome::Draw);

        for seat in &record.seat_results {
            let acc = self
                .agents
                .get_mut(&seat.agent_name)
                .ok_or_else(|| AnalyticsError::UnknownAgent(seat.agent_name.clone()))?;

            acc.record_game(
                f64::from(seat.team_score),
                seat.won,
                draw,
                finished,
                &seat.metrics,
            );
        }

        Ok(())
    }

    pub fn finalize(mut self) -> AnalyticsSummary {
        let mut reports = Vec::new();
        for name in &self.agent_order {
            if let Some(acc) = self.agents.remove(name) {
                reports.push(acc.into_report());
            }
        }

        AnalyticsSummary {
            agents: reports,
            games: self.games,
            unfinished_games: self.unfinished_games,
            latency_budget_ms: self.latency_budget_ms,
        }
    }
}

struct AgentAccumulator {
    config: AgentConfig,
    games: u32,
    wins: u32,
    draws: u32,
    unfinished: u32,
    final_scores: Vec<f64>,
    total_latency_ms: f64,
    total_decisions: u64,
    latency_budget_ms: u64,
}

impl AgentAccumulator {
    fn new(config: AgentConfig, latency_budget_ms: u64) -> Self {
        Self {
            config,
            games: 0,
            wins: 0,
            draws: 0,
            unfinished: 0,
            final_scores: Vec::new(),
            total_latency_ms: 0.0,
            total_decisions: 0,
            latency_budget_ms,
        }
    }

    fn record_game(
        &mut self,
        team_score: f64,
        won: bool,
        draw: bool,
        finished: bool,
        metrics: &DecisionSummary,
    ) {
        self.games += 1;
        self.final_scores.push(team_score);
        if won {
            self.wins += 1;
        }
        if draw {
            self.draws += 1;
        }
        if !finished {
            self.unfinished += 1;
        }
        self.total_latency_ms += metrics.total_ms;
        self.total_decisions += u64::from(metrics.decisions);
    }

    fn into_report(self) -> AgentReport {
        let avg_score = if self.games == 0 {
            0.0
        } else {
            self.final_scores.iter().sum::<f64>() / f64::from(self.games)
        };

        let avg_latency = if self.total_decisions == 0 {
            0.0
        } else {
            self.total_latency_ms / self.total_decisions as f64
        };

        AgentReport {
            ci95: confidence_interval(&self.final_scores),
            name: self.config.name,
            kind: self.config.kind,
            params: self.config.params,
            games: self.games as usize,
            wins: self.wins as usize,
            draws: self.draws as usize,
            unfinished: self.unfinished as usize,
            avg_final_score: avg_score,
            average_ms_per_decision: avg_latency,
            over_budget: avg_latency > self.latency_budget_ms as f64,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub agents: Vec<AgentReport>,
    pub games: usize,
    pub unfinished_games: usize,
    pub latency_budget_ms: u64,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str("# Tournament Summary\n\n");
        rows.push_str(&format!(
            "Games: {} ({} stopped at the deal cap)\n\n",
            self.games, self.unfinished_games
        ));
        rows.push_str(&format!(
            "Latency budget: {} ms average per decision\n\n",
            self.latency_budget_ms
        ));
        rows.push_str("| Agent | Kind | Difficulty | Games | Win % | Draws | Avg Final Score | 95% CI | Avg ms/decision | Over Budget |\n");
        rows.push_str("|-------|------|------------|-------|-------|-------|-----------------|--------|-----------------|-------------|\n");

        for agent in &self.agents {
            let difficulty = agent
                .params
                .get("difficulty")
                .and_then(|value| value.as_str())
                .unwrap_or("normal");

            rows.push_str(&format!(
                "| {name} | {kind:?} | {difficulty} | {games} | {win:.1}% | {draws} | {avg:.1} | [{ci_low:.1}, {ci_high:.1}] | {latency:.3} | {over_budget} |\n",
                name = agent.name,
                kind = agent.kind,
                games = agent.games,
                win = agent.win_rate() * 100.0,
                draws = agent.draws,
                avg = agent.avg_final_score,
                ci_low = agent.ci95.0,
                ci_high = agent.ci95.1,
                latency = agent.average_ms_per_decision,
                over_budget = if agent.over_budget { "Yes" } else { "No" },
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub kind: AgentKind,
    pub params: serde_yaml::Value,
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub avg_final_score: f64,
    pub ci95: (f64, f64),
    pub average_ms_per_decision: f64,
    #[serde(skip)]
    pub over_budget: bool,
}

impl AgentReport {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

fn confidence_interval(points: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean = points.iter().sum::<f64>() / points.len() as f64;
    if points.len() == 1 {
        return (mean, mean);
    }
    let variance = points
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (points.len() as f64 - 1.0);
    let std_error = (variance / points.len() as f64).sqrt();
    let margin = CONFIDENCE_Z * std_error;
    (mean - margin, mean + margin)
}
