use std::ffi::OsString;
use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};

use py_core::RawFlags;

const EXAMPLES: &str = "\
Examples:
  echo \"张三\" | py
  echo \"张三\" | py -u
  jq -r '.name' test.json | py";

#[derive(Debug, Parser)]
#[command(
    name = "py",
    version,
    about = "Convert Han characters to pinyin initials",
    long_about = "Reads standard input line by line and replaces each Han character \
                  with the first letter of its pinyin reading.",
    after_help = EXAMPLES,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Upper-case initials
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub upper: bool,

    /// Lower-case initials (default)
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub lower: bool,

    /// Keep non-Han characters (default)
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub keep_non_han: bool,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Worker threads (overrides [parallel] jobs)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Longest accepted input line in bytes, exclusive (overrides [input] max_line_bytes)
    #[arg(long, value_name = "BYTES")]
    pub max_line_bytes: Option<usize>,

    /// Stray positional arguments, accepted and ignored.
    #[arg(hide = true, value_name = "ARG")]
    pub ignored: Vec<OsString>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect settings files
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the default settings TOML
    Export,
    /// Validate a settings file
    Validate {
        /// Settings file
        file: PathBuf,
    },
}

/// Parsed arguments plus whether `--upper` came from the command line.
#[derive(Debug)]
pub struct Invocation {
    pub cli: Cli,
    pub upper_explicit: bool,
}

impl Invocation {
    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Cli::command().try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches(&matches)?;
        let upper_explicit = matches.value_source("upper") == Some(ValueSource::CommandLine);
        Ok(Self {
            cli,
            upper_explicit,
        })
    }

    pub fn raw_flags(&self) -> RawFlags {
        RawFlags {
            upper: self.cli.upper,
            upper_explicit: self.upper_explicit,
            lower: self.cli.lower,
            keep_non_han: self.cli.keep_non_han,
        }
    }
}
