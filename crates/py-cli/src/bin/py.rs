use std::process::ExitCode;

use py_cli::args::{Command, Invocation, SettingsCommand};
use py_cli::commands::{config_ops, filter_ops};
use py_cli::trace_init::init_tracing;

fn main() -> ExitCode {
    let invocation = match Invocation::parse_from(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => e.exit(),
    };
    init_tracing();

    match &invocation.cli.command {
        Some(Command::Settings(SettingsCommand::Export)) => {
            config_ops::settings_export();
            ExitCode::SUCCESS
        }
        Some(Command::Settings(SettingsCommand::Validate { file })) => {
            config_ops::settings_validate(file);
            ExitCode::SUCCESS
        }
        None => filter_ops::filter_cmd(&invocation.cli, invocation.raw_flags()),
    }
}
