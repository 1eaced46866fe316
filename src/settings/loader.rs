use anyhow::{Context, Result};
use tracing::debug;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Merge every configuration layer, apply the command line on top and
/// validate the result.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let mut raw: RawConfig = build_config(cli)?
        .try_deserialize()
        .context("configuration does not match the picker settings")?;
    raw.apply_cli_overrides(cli);
    let resolved = raw.resolve()?;
    debug!(
        hide_delay = ?resolved.page.panel.hide_delay,
        output = resolved.output.as_str(),
        "configuration resolved"
    );
    Ok(resolved)
}
