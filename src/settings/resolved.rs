use std::path::PathBuf;

use locale_picker::page::PageOptions;

use crate::cli::OutputFormat;

/// Application-ready configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Catalog file; the built-in catalog when unset.
    pub catalog_path: Option<PathBuf>,
    pub page: PageOptions,
    /// Overrides the catalog's own live-region template.
    pub results_template: Option<String>,
    pub output: OutputFormat,
    pub log_level: String,
    /// Log destination for scripted runs; stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        println!("{}", self.summary());
    }

    pub(crate) fn summary(&self) -> String {
        let mut lines = vec!["Effective configuration:".to_string()];
        match &self.catalog_path {
            Some(path) => lines.push(format!("  Catalog: {}", path.display())),
            None => lines.push("  Catalog: (built-in)".to_string()),
        }
        lines.push(format!(
            "  Hide delay: {} ms",
            self.page.panel.hide_delay.as_millis()
        ));
        lines.push(format!(
            "  Frame interval: {} ms",
            self.page.frame_interval.as_millis()
        ));
        if let Some(template) = &self.results_template {
            lines.push(format!("  Results template: {template}"));
        }
        lines.push(format!("  Output: {}", self.output.as_str()));
        lines.push(format!("  Log level: {}", self.log_level));
        if let Some(file) = &self.log_file {
            lines.push(format!("  Log file: {}", file.display()));
        }
        lines.join("\n")
    }
}
