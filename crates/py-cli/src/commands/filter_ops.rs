use std::io::{self, BufWriter};
use std::process::ExitCode;

use tracing::{debug, info, warn};

use py_core::pipeline::{self, PipelineError, PipelineOptions, PipelineStats};
use py_core::{OverrideOracle, PinyinOracle, RawFlags, Settings};

use crate::args::Cli;

/// Settings file values with command-line overrides applied.
pub fn pipeline_options(cli: &Cli, settings: &Settings) -> Result<PipelineOptions, String> {
    let mut options = settings.pipeline_options();
    if let Some(jobs) = cli.jobs {
        options.jobs = jobs;
    }
    if let Some(max) = cli.max_line_bytes {
        options.max_line_bytes = max;
    }
    if options.jobs == 0 {
        return Err("--jobs must be positive".to_string());
    }
    if options.max_line_bytes == 0 {
        return Err("--max-line-bytes must be positive".to_string());
    }
    Ok(options)
}

/// Convert stdin to stdout. Input failures go to stderr with a failing exit code.
pub fn filter_cmd(cli: &Cli, flags: RawFlags) -> ExitCode {
    let settings = die!(Settings::load(cli.config.as_deref()), "Error: {}");
    let options = die!(pipeline_options(cli, &settings), "Error: {}");
    let config = flags.resolve();
    let oracle = OverrideOracle::new(PinyinOracle, settings.reading_overrides().clone());
    debug!(?config, ?options, overrides = oracle.len(), "starting");
    if !cli.ignored.is_empty() {
        debug!(ignored = ?cli.ignored, "positional arguments ignored");
    }

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout());
    match settle(pipeline::run(stdin, stdout, &config, &oracle, &options)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Only input-side failures fail the run. Output failures stop it with a
/// warning (none for a closed pipe) and still count as success.
fn settle(result: Result<PipelineStats, PipelineError>) -> Result<(), PipelineError> {
    match result {
        Ok(stats) => {
            info!(lines = stats.lines, bytes_in = stats.bytes_in, "done");
            Ok(())
        }
        // Downstream closed early (e.g. `py | head`).
        Err(PipelineError::Write(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed");
            Ok(())
        }
        Err(PipelineError::Write(e)) => {
            warn!("failed to write output: {e}");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
