use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, format::FmtSpan};

use crate::config::{LoggingConfig, ResolvedOutputs};

pub const TELEMETRY_FILE: &str = "telemetry.jsonl";

const RUN_ID_VAR: &str = "SPADES_BENCH_RUN_ID";
const RULE_DETAILS_VAR: &str = "SPADES_RULE_DETAILS";

/// Hold for the whole run. Events still queued are written when it drops.
pub struct LoggingGuard {
    _flush_on_drop: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Sends `tracing` events as JSON lines to `telemetry.jsonl` beside the
/// summary. Returns `None` when structured logging is switched off.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    export_run_flags(run_id, logging.rule_details);

    let telemetry_path = outputs.artifacts_dir().join(TELEMETRY_FILE);
    let file = open_telemetry(&telemetry_path)?;
    let (writer, flush_on_drop) = NonBlockingBuilder::default().lossy(false).finish(file);

    let default_level = logging.level().unwrap_or(Level::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let subscriber = fmt::Subscriber::builder()
        .json()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_current_span(false)
        .with_writer(writer)
        .finish();

    // Only the first install wins; later runs in one process share it.
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!(run_id, "tracing subscriber already installed");
    }

    Ok(Some(LoggingGuard {
        _flush_on_drop: flush_on_drop,
        telemetry_path,
    }))
}

/// The run id is for child tools; the planner reads the rule-detail switch.
fn export_run_flags(run_id: &str, rule_details: bool) {
    // SAFETY: runs before any game starts; the harness plays on one thread.
    unsafe {
        std::env::set_var(RUN_ID_VAR, run_id);
        if rule_details {
            std::env::set_var(RULE_DETAILS_VAR, "1");
        }
    }
}

fn open_telemetry(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("telemetry directory {} could not be made", dir.display()))?;
    }
    File::create(path).with_context(|| format!("telemetry file {} could not be opened", path.display()))
}
