mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use locale_picker::logging;
use workflow::PickerWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    let workflow = PickerWorkflow::from_config(&cli, &resolved)?;
    let level = logging::level_for_verbosity(&resolved.log_level, cli.verbose);
    logging::initialize(&level, &workflow.log_target()?)?;

    run_session(resolved.output, workflow)
}

/// Run the session and print its report in the chosen format.
fn run_session(format: OutputFormat, workflow: PickerWorkflow) -> Result<()> {
    let report = workflow.run()?;

    match format {
        OutputFormat::Plain => print_plain(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}
