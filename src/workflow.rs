use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use locale_picker::logging::LogTarget;
use locale_picker::{Catalog, PageOptions, Session, SessionReport, Step, app_dirs, script, tui};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::settings::ResolvedConfig;

const INTERACTIVE_LOG_FILE: &str = "locale-picker.log";

enum Mode {
    Script(Vec<Step>),
    Interactive,
}

/// Everything needed to run one picker session.
pub(crate) struct PickerWorkflow {
    catalog: Catalog,
    page: PageOptions,
    mode: Mode,
    log_file: Option<PathBuf>,
}

impl PickerWorkflow {
    /// Load the catalog and the steps named by the configuration and CLI.
    pub(crate) fn from_config(cli: &CliArgs, settings: &ResolvedConfig) -> Result<Self> {
        let mut catalog = match &settings.catalog_path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?,
            None => Catalog::builtin().context("built-in catalog is invalid")?,
        };
        if let Some(template) = &settings.results_template {
            catalog.results_template = Some(template.clone());
        }

        let mode = if cli.interactive {
            Mode::Interactive
        } else {
            let mut steps = Vec::new();
            if let Some(path) = &cli.script {
                let source = fs::read_to_string(path)
                    .with_context(|| format!("failed to read script {}", path.display()))?;
                steps = script::parse(&source)
                    .with_context(|| format!("invalid script {}", path.display()))?;
            }
            for raw in &cli.steps {
                let step: Step = raw
                    .parse()
                    .with_context(|| format!("invalid --step '{raw}'"))?;
                steps.push(step);
            }
            Mode::Script(steps)
        };

        Ok(Self {
            catalog,
            page: settings.page,
            mode,
            log_file: settings.log_file.clone(),
        })
    }

    /// Where logs go: the terminal UI owns the screen, so it always logs to a
    /// file.
    pub(crate) fn log_target(&self) -> Result<LogTarget> {
        if let Some(path) = &self.log_file {
            return Ok(LogTarget::File(path.clone()));
        }
        match self.mode {
            Mode::Script(_) => Ok(LogTarget::Stderr),
            Mode::Interactive => Ok(LogTarget::File(
                app_dirs::get_data_dir()?.join(INTERACTIVE_LOG_FILE),
            )),
        }
    }

    pub(crate) fn run(self) -> Result<SessionReport> {
        let languages = self
            .catalog
            .languages
            .iter()
            .map(|language| language.code.clone())
            .collect();
        let mut session = Session::new(self.catalog, self.page)?;

        match self.mode {
            Mode::Script(steps) => {
                info!(steps = steps.len(), "running scripted session");
                Ok(session.run(&steps)?)
            }
            Mode::Interactive => {
                let (exit, report) = tui::run(session, languages)?;
                debug!(?exit, "terminal session ended");
                Ok(report)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;
    use crate::cli::OutputFormat;

    fn settings() -> ResolvedConfig {
        ResolvedConfig {
            catalog_path: None,
            page: PageOptions::default(),
            results_template: None,
            output: OutputFormat::Plain,
            log_level: "warn".into(),
            log_file: None,
        }
    }

    fn cli(args: &[&str]) -> CliArgs {
        let mut full = vec!["locale-picker", "--no-config"];
        full.extend_from_slice(args);
        CliArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn script_file_runs_before_inline_steps() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# open first\ntoggle\ntype france").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let workflow =
            PickerWorkflow::from_config(&cli(&["--script", &path, "--step", "down"]), &settings())
                .unwrap();
        assert!(matches!(workflow.log_target().unwrap(), LogTarget::Stderr));

        let report = workflow.run().unwrap();
        assert_eq!(report.steps, 3);
        assert_eq!(report.selected(), Some("FR"));
    }

    #[test]
    fn template_override_reaches_the_live_region() {
        let mut settings = settings();
        settings.results_template = Some("[count] hits".into());
        let workflow =
            PickerWorkflow::from_config(&cli(&["--step", "type japan"]), &settings).unwrap();
        let report = workflow.run().unwrap();
        assert_eq!(report.page.announcement, "1 hits");
    }

    #[test]
    fn bad_inline_steps_are_reported() {
        let err = PickerWorkflow::from_config(&cli(&["--step", "jump"]), &settings())
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("unknown step 'jump'"));
    }

    #[test]
    fn interactive_sessions_log_to_a_file() {
        let mut settings = settings();
        settings.log_file = Some(PathBuf::from("/tmp/picker.log"));
        let workflow = PickerWorkflow::from_config(&cli(&["-i"]), &settings).unwrap();
        assert_eq!(
            workflow.log_target().unwrap(),
            LogTarget::File(PathBuf::from("/tmp/picker.log"))
        );
    }
}
