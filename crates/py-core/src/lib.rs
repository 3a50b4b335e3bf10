pub mod config;
pub mod oracle;
pub mod pipeline;
pub mod script;
pub mod settings;
pub mod transliterate;

#[cfg(test)]
mod tests;

pub use config::{CaseMode, Config, RawFlags};
pub use oracle::{OracleError, OverrideOracle, PinyinOracle, ReadingOracle};
pub use pipeline::{run, LineReader, PipelineError, PipelineOptions, PipelineStats};
pub use settings::{Settings, SettingsError};
pub use transliterate::{convert_line, Initials, Transliterator};
