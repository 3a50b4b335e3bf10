//! Stream driver: read lines, convert each one, write one output line per
//! input line in input order.
//!
//! With `jobs > 1` lines are converted in batches on worker threads and
//! reassembled by batch index, so the output is the same as a sequential run.

mod reader;
mod worker;

use std::io::{self, BufRead, Write};

use tracing::{debug, debug_span};

use crate::config::Config;
use crate::oracle::ReadingOracle;
use crate::transliterate::Transliterator;

pub use reader::LineReader;

/// Default scan buffer size; a line must be shorter than this.
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    #[error("line {line} is too long (limit {limit} bytes)")]
    LineTooLong { line: usize, limit: usize },
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("worker thread panicked")]
    WorkerPanicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub max_line_bytes: usize,
    pub jobs: usize,
    pub batch_lines: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            jobs: 1,
            batch_lines: 256,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub lines: usize,
    pub bytes_in: usize,
    pub bytes_out: usize,
}

impl PipelineStats {
    fn add(&mut self, other: PipelineStats) {
        self.lines += other.lines;
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
    }
}

/// Convert every line of `reader` into `writer`.
///
/// On a read failure, every line read before it is still written (and the
/// writer flushed) before the error is returned.
pub fn run<R: BufRead, W: Write + Send>(
    reader: R,
    writer: W,
    config: &Config,
    oracle: &dyn ReadingOracle,
    options: &PipelineOptions,
) -> Result<PipelineStats, PipelineError> {
    let _span = debug_span!("pipeline", jobs = options.jobs, batch = options.batch_lines).entered();

    let lines = LineReader::new(reader, options.max_line_bytes);
    let transliterator = Transliterator::new(config, oracle);
    let stats = if options.jobs <= 1 {
        run_sequential(lines, writer, transliterator)?
    } else {
        worker::run_parallel(lines, writer, transliterator, options)?
    };

    debug!(
        lines = stats.lines,
        bytes_in = stats.bytes_in,
        bytes_out = stats.bytes_out
    );
    Ok(stats)
}

fn run_sequential<R: BufRead, W: Write>(
    mut lines: LineReader<R>,
    mut writer: W,
    transliterator: Transliterator<'_>,
) -> Result<PipelineStats, PipelineError> {
    let mut stats = PipelineStats::default();
    let mut out = String::new();
    let result = loop {
        match lines.read_line() {
            Ok(Some(line)) => {
                out.clear();
                out.extend(transliterator.initials(&line));
                out.push('\n');
                writer
                    .write_all(out.as_bytes())
                    .map_err(PipelineError::Write)?;
                stats.add(PipelineStats {
                    lines: 1,
                    bytes_in: line.len(),
                    bytes_out: out.len(),
                });
            }
            Ok(None) => break Ok(stats),
            Err(e) => break Err(e),
        }
    };
    writer.flush().map_err(PipelineError::Write)?;
    result
}
