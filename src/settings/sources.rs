use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File};
use locale_picker::app_dirs;

use crate::cli::CliArgs;

/// `LOCALE_PICKER__PICKER__HIDE_DELAY_MS=300` sets `picker.hide_delay_ms`.
const ENV_PREFIX: &str = "locale_picker";
const ENV_SEPARATOR: &str = "__";

/// A config file layer. Files named on the command line must exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ConfigFile {
    pub(super) path: PathBuf,
    pub(super) required: bool,
}

/// Files to merge for this invocation, lowest precedence first.
pub(super) fn config_files(cli: &CliArgs) -> Vec<ConfigFile> {
    let defaults = if cli.no_config {
        Vec::new()
    } else {
        default_config_files()
    };
    let optional = defaults.into_iter().map(|path| ConfigFile {
        path,
        required: false,
    });
    let explicit = cli.config.iter().map(|path| ConfigFile {
        path: path.clone(),
        required: true,
    });
    optional.chain(explicit).collect()
}

/// Merge the config files, then the environment on top.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
    let files = config_files(cli);
    let builder = files.iter().fold(Config::builder(), |builder, file| {
        builder.add_source(File::from(file.path.clone()).required(file.required))
    });
    let environment = Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true);

    builder
        .add_source(environment)
        .build()
        .map_err(|err| match err {
            ConfigError::Frozen => anyhow!("picker configuration was already built"),
            other => other.into(),
        })
}

/// The per-user `config.toml`, then the project files in the working
/// directory.
pub(super) fn default_config_files() -> Vec<PathBuf> {
    let user = app_dirs::get_config_dir()
        .ok()
        .map(|dir| dir.join("config.toml"));
    let project = env::current_dir().ok().into_iter().flat_map(|dir| {
        [".locale-picker.toml", "locale-picker.toml"].map(|name| dir.join(name))
    });
    user.into_iter().chain(project).collect()
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> CliArgs {
        let mut full = vec!["locale-picker"];
        full.extend_from_slice(args);
        CliArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn default_files_include_current_directory_variants() {
        let files = default_config_files();
        assert!(files.iter().any(|path| path.ends_with(".locale-picker.toml")));
        assert!(files.iter().any(|path| path.ends_with("locale-picker.toml")));
    }

    #[test]
    fn no_config_keeps_only_explicit_files() {
        let files = config_files(&cli(&["-n", "-c", "a.toml", "-c", "b.toml"]));
        assert_eq!(
            files,
            [
                ConfigFile {
                    path: PathBuf::from("a.toml"),
                    required: true,
                },
                ConfigFile {
                    path: PathBuf::from("b.toml"),
                    required: true,
                },
            ]
        );
    }

    #[test]
    fn explicit_files_come_after_the_defaults() {
        let files = config_files(&cli(&["-c", "extra.toml"]));
        let last = files.last().unwrap();
        assert_eq!(last.path, PathBuf::from("extra.toml"));
        assert!(last.required);
        assert!(files[..files.len() - 1].iter().all(|file| !file.required));
    }
}
