use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail, ensure};
use locale_picker::page::PageOptions;
use locale_widgets::PanelOptions;
use serde::Deserialize;

use super::resolved::ResolvedConfig;
use crate::cli::{CliArgs, OutputFormat};

const MAX_HIDE_DELAY_MS: u64 = 10_000;
const MAX_FRAME_INTERVAL_MS: u64 = 1_000;
const DEFAULT_LOG_LEVEL: &str = "warn";
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Configuration as read from files and the environment, before CLI overrides
/// and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    catalog: CatalogSection,
    picker: PickerSection,
    output: OutputSection,
    logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogSection {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PickerSection {
    hide_delay_ms: Option<u64>,
    frame_interval_ms: Option<u64>,
    results_template: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OutputSection {
    format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
    level: Option<String>,
    file: Option<PathBuf>,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = cli.catalog.clone() {
            self.catalog.path = Some(path);
        }
        if let Some(delay) = cli.hide_delay_ms {
            self.picker.hide_delay_ms = Some(delay);
        }
        if let Some(format) = cli.output {
            self.output.format = Some(format.as_str().to_string());
        }
    }

    /// Validate the merged values and fill in defaults.
    pub(super) fn resolve(self) -> Result<ResolvedConfig> {
        let defaults = PageOptions::default();

        let hide_delay = match self.picker.hide_delay_ms {
            Some(ms) => {
                ensure!(
                    ms <= MAX_HIDE_DELAY_MS,
                    "picker.hide_delay_ms must be at most {MAX_HIDE_DELAY_MS} (got {ms})"
                );
                Duration::from_millis(ms)
            }
            None => defaults.panel.hide_delay,
        };

        let frame_interval = match self.picker.frame_interval_ms {
            Some(ms) => {
                ensure!(
                    (1..=MAX_FRAME_INTERVAL_MS).contains(&ms),
                    "picker.frame_interval_ms must be between 1 and {MAX_FRAME_INTERVAL_MS} (got {ms})"
                );
                Duration::from_millis(ms)
            }
            None => defaults.frame_interval,
        };

        let results_template = match self.picker.results_template {
            Some(template) if template.trim().is_empty() => {
                bail!("picker.results_template must not be empty")
            }
            other => other,
        };

        let output = match self.output.format.as_deref().map(str::trim) {
            None => OutputFormat::default(),
            Some(value) if value.eq_ignore_ascii_case("plain") => OutputFormat::Plain,
            Some(value) if value.eq_ignore_ascii_case("json") => OutputFormat::Json,
            Some(other) => bail!("unknown output.format '{other}' (expected plain or json)"),
        };

        let log_level = match self.logging.level {
            Some(level) => {
                let level = level.trim().to_ascii_lowercase();
                ensure!(
                    LOG_LEVELS.contains(&level.as_str()),
                    "unknown logging.level '{level}' (expected one of {})",
                    LOG_LEVELS.join(", ")
                );
                level
            }
            None => DEFAULT_LOG_LEVEL.to_string(),
        };

        Ok(ResolvedConfig {
            catalog_path: self.catalog.path,
            page: PageOptions {
                panel: PanelOptions { hide_delay },
                frame_interval,
            },
            results_template,
            output,
            log_level,
            log_file: self.logging.file,
        })
    }
}
