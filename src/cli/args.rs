use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use locale_picker::app_dirs;

/// Version banner with the directories the binary reads from.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let data_dir = match app_dirs::get_data_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("locale-picker {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "data directory: {data_dir}");

    Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse the process arguments.
pub(crate) fn parse_cli() -> CliArgs {
    let mut matches = CliArgs::command().get_matches();
    CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Parser, Debug)]
#[command(
    name = "locale-picker",
    version,
    long_version = long_version(),
    about = "Storefront country/region and language picker, scripted or interactive",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `locale-picker` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "LOCALE_PICKER_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long,
        value_name = "PATH",
        help = "Catalog of countries and languages, TOML or JSON (default: built-in catalog)"
    )]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(
        short = 's',
        long,
        value_name = "FILE",
        help = "Replay the steps in FILE, one per line"
    )]
    pub(crate) script: Option<PathBuf>,
    #[arg(
        long = "step",
        value_name = "STEP",
        action = ArgAction::Append,
        help = "Inline step, run after --script (repeatable)"
    )]
    pub(crate) steps: Vec<String>,
    #[arg(
        short = 'i',
        long,
        conflicts_with_all = ["script", "steps"],
        help = "Drive the picker from the terminal (default: disabled)"
    )]
    pub(crate) interactive: bool,
    #[arg(
        long = "hide-delay",
        value_name = "MS",
        help = "Milliseconds between closing and hiding the panel (default: 220)"
    )]
    pub(crate) hide_delay_ms: Option<u64>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        help = "Choose how to print the report (default: plain)"
    )]
    pub(crate) output: Option<OutputFormat>,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Raise log verbosity (-v debug, -vv trace)"
    )]
    pub(crate) verbose: u8,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
/// Report formats supported by the CLI.
pub(crate) enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl OutputFormat {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }
}
