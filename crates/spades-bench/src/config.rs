use serde::{Deserialize, Serialize};
use spades_bot::BotDifficulty;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_SEAT_PERMUTATIONS: usize = 3;
const DEFAULT_MAX_DEALS: u32 = 200;
const DEFAULT_LATENCY_BUDGET_MS: u64 = 50;
const DEFAULT_TRACING_LEVEL: &str = "info";
const TABLE_SIZE: usize = 4;
const RUN_ID_PLACEHOLDER: &str = "{run_id}";

/// A tournament run as described in `bench.yaml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub games: GameConfig,
    pub agents: Vec<AgentConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Reads, parses and checks a run file. Every failure carries the path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        let mut cfg: BenchmarkConfig = match serde_yaml::from_str(&text) {
            Ok(cfg) => cfg,
            Err(source) => return Err(ConfigError::Parse { path, source }),
        };
        if let Err(source) = cfg.validate() {
            return Err(ConfigError::Invalid { path, source });
        }
        Ok(cfg)
    }

    /// Checks every section and fills in defaults the YAML left blank.
    /// Touches nothing on disk.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        check_identifier("run_id", &self.run_id)?;
        self.games.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.metrics.validate()?;
        self.logging.fill_defaults();
        validate_agents(&mut self.agents)
    }

    /// Output paths with the run id substituted in.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        let expand = |template: &str| expand_run_id(&self.run_id, template);
        ResolvedOutputs {
            jsonl: expand(&self.outputs.jsonl),
            summary_md: expand(&self.outputs.summary_md),
        }
    }
}

/// How many games to play and how they are seeded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default = "default_permutations")]
    pub permutations: usize,
    /// Deals after which an undecided game is abandoned.
    #[serde(default = "default_max_deals")]
    pub max_deals: u32,
}

impl GameConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(invalid("games.count", "at least one game is needed"));
        }
        if self.permutations == 0 {
            return Err(invalid(
                "games.permutations",
                "at least one seating is needed",
            ));
        }
        if self.max_deals == 0 {
            return Err(invalid("games.max_deals", "a game needs at least one deal"));
        }
        Ok(())
    }
}

fn default_permutations() -> usize {
    DEFAULT_SEAT_PERMUTATIONS
}

fn default_max_deals() -> u32 {
    DEFAULT_MAX_DEALS
}

/// One seat's worth of bot.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub kind: AgentKind,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

impl AgentConfig {
    /// Difficulty from `params.difficulty`, defaulting to normal.
    pub fn difficulty(&self) -> Result<BotDifficulty, ValidationError> {
        let Some(value) = self.params.get("difficulty") else {
            return Ok(BotDifficulty::default());
        };
        let field = format!("agents[{}].params.difficulty", self.name);
        let Some(text) = value.as_str() else {
            return Err(invalid(field, "expected a difficulty name"));
        };
        BotDifficulty::parse(text)
            .ok_or_else(|| invalid(field, format!("'{text}' is not a known difficulty")))
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    #[serde(alias = "heuristic")]
    RuleTable,
}

/// Where the game rows and the Markdown summary go. Both may use `{run_id}`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let targets = [
            ("outputs.jsonl", self.jsonl.as_str()),
            ("outputs.summary_md", self.summary_md.as_str()),
        ];
        for (field, template) in targets {
            if template.trim().is_empty() {
                return Err(invalid(field, "an output path is required"));
            }
            if expand_run_id(run_id, template).components().next().is_none() {
                return Err(invalid(field, format!("'{template}' names no file")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MetricsConfig {
    #[serde(default = "default_latency_budget_ms")]
    pub latency_budget_ms: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            latency_budget_ms: default_latency_budget_ms(),
        }
    }
}

impl MetricsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.latency_budget_ms {
            0 => Err(invalid(
                "metrics.latency_budget_ms",
                "a zero budget flags every decision",
            )),
            _ => Ok(()),
        }
    }
}

fn default_latency_budget_ms() -> u64 {
    DEFAULT_LATENCY_BUDGET_MS
}

/// Structured logging is off unless enabled.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub rule_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            rule_details: false,
        }
    }
}

impl LoggingConfig {
    fn fill_defaults(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    /// `None` for names `tracing` does not know; `warning` is read as `warn`.
    pub fn level(&self) -> Option<Level> {
        let name = self.tracing_level.trim();
        if name.eq_ignore_ascii_case("warning") {
            return Some(Level::WARN);
        }
        name.parse().ok()
    }
}

fn default_tracing_level() -> String {
    DEFAULT_TRACING_LEVEL.to_string()
}

/// Run ids and agent names end up in file paths and JSON keys.
fn check_identifier(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "cannot be blank"));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if let Some(bad) = value.chars().find(|c| !allowed(*c)) {
        return Err(invalid(
            field,
            format!("'{bad}' is not allowed; use letters, digits, '.', '_' or '-'"),
        ));
    }
    Ok(())
}

fn validate_agents(agents: &mut [AgentConfig]) -> Result<(), ValidationError> {
    if agents.len() != TABLE_SIZE {
        return Err(invalid(
            "agents",
            format!("a table seats {TABLE_SIZE} agents, got {}", agents.len()),
        ));
    }

    let mut names = HashSet::with_capacity(TABLE_SIZE);
    for agent in agents.iter_mut() {
        check_identifier("agents.name", &agent.name)?;
        if !names.insert(agent.name.clone()) {
            return Err(invalid(
                "agents",
                format!("'{}' is listed more than once", agent.name),
            ));
        }
        if agent.params.is_null() {
            agent.params = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
        }
        agent.difficulty()?;
    }
    Ok(())
}

fn expand_run_id(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace(RUN_ID_PLACEHOLDER, run_id))
}

/// Output paths after `{run_id}` expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

impl ResolvedOutputs {
    /// Directory holding the summary; telemetry is written next to it.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.summary_md
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Why a run file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open run file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("run file {} is not valid YAML: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("run file {} was rejected: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        let (ConfigError::Read { path, .. }
        | ConfigError::Parse { path, .. }
        | ConfigError::Invalid { path, .. }) = self;
        path
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.into(),
        message: message.into(),
    }
}
