//! Tracing subscriber setup for the binary.
//!
//! Scripted runs log to stderr. The terminal UI owns the screen, so its logs go
//! to a file instead.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Level names from quietest to most verbose.
const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Raise `base` to the level implied by `-v` repetitions, never lowering it.
/// `RUST_LOG` still overrides the result.
pub fn level_for_verbosity(base: &str, verbosity: u8) -> String {
    let requested = match verbosity {
        0 => return base.to_string(),
        1 => "debug",
        _ => "trace",
    };
    let rank = |level: &str| LEVELS.iter().position(|known| known.eq_ignore_ascii_case(level));
    match (rank(base), rank(requested)) {
        (Some(current), Some(wanted)) if current >= wanted => base.to_string(),
        _ => requested.to_string(),
    }
}

/// Install the global subscriber.
pub fn initialize(level: &str, target: &LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err)),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|err| anyhow!(err))
        }
    }
}
