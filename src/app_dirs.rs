//! Where the picker keeps its configuration and the logs of terminal sessions.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "storefront";
const APPLICATION: &str = "locale-picker";

/// A directory the binary reads from or writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    /// Holds `config.toml`.
    Config,
    /// Receives `locale-picker.log` from interactive sessions.
    Data,
}

impl AppDir {
    /// Environment variable that replaces the platform location.
    pub fn env_override(self) -> &'static str {
        match self {
            AppDir::Config => "LOCALE_PICKER_CONFIG_DIR",
            AppDir::Data => "LOCALE_PICKER_DATA_DIR",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AppDir::Config => "configuration",
            AppDir::Data => "data",
        }
    }

    pub fn resolve(self) -> Result<PathBuf> {
        if let Some(dir) = non_empty(env::var_os(self.env_override())) {
            return Ok(dir);
        }
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
            anyhow!(
                "no home directory to place the picker {} directory in; set {}",
                self.label(),
                self.env_override()
            )
        })?;
        let dir = match self {
            AppDir::Config => dirs.config_local_dir(),
            AppDir::Data => dirs.data_local_dir(),
        };
        Ok(dir.to_path_buf())
    }
}

/// An empty override counts as unset.
fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

pub fn get_config_dir() -> Result<PathBuf> {
    AppDir::Config.resolve()
}

pub fn get_data_dir() -> Result<PathBuf> {
    AppDir::Data.resolve()
}
