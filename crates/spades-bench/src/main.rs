use std::path::PathBuf;

use clap::Parser;

use spades_bench::config::{BenchmarkConfig, ResolvedOutputs};
use spades_bench::logging::init_logging;
use spades_bench::tournament::TournamentRunner;

/// Tournament benchmarking harness for Spades bots.
#[derive(Debug, Parser)]
#[command(
    name = "spades-bench",
    author,
    version,
    about = "Deterministic Spades tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for game generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of seat permutations per game.
    #[arg(long, value_name = "COUNT")]
    permutations: Option<usize>,

    /// Override the deal cap after which a game is abandoned.
    #[arg(long, value_name = "DEALS")]
    max_deals: Option<u32>,

    /// Exit after validating the configuration (no tournament is run).
    #[arg(long)]
    validate_only: bool,

    /// Log every rule the bots evaluate (forces SPADES_RULE_DETAILS=1).
    #[arg(long)]
    log_rule_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(permutations) = cli.permutations {
        config.games.permutations = permutations;
    }

    if let Some(max_deals) = cli.max_deals {
        config.games.max_deals = max_deals;
    }

    if cli.log_rule_details {
        config.logging.rule_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let permutations = config.games.permutations;

    println!(
        "Loaded configuration '{run_id}' ({games} game{}, {permutations} permutations)",
        if games == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} games × {} permutations → {} rows at {}",
        summary.games_played,
        summary.permutations,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    if summary.unfinished_games > 0 {
        println!(
            "{} game(s) reached the deal cap without a winner",
            summary.unfinished_games
        );
    }
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
