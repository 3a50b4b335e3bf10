//! Settings loaded from TOML.
//!
//! - Default values are embedded via `include_str!("default_settings.toml")`
//! - A user file is overlaid on the defaults, so it only needs the keys it changes
//! - `[readings]` pins readings for individual Han characters

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::pipeline::PipelineOptions;
use crate::script::is_han;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input: InputSettings,
    pub parallel: ParallelSettings,
    #[serde(default)]
    readings: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    readings_parsed: HashMap<char, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    pub max_line_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParallelSettings {
    pub jobs: usize,
    pub batch_lines: usize,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml("").expect("embedded settings TOML must be valid")
    }
}

impl Settings {
    /// Load from `path`, or the embedded defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return parse_settings_toml("");
        };
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_settings_toml(&content)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_line_bytes: self.input.max_line_bytes,
            jobs: self.parallel.jobs,
            batch_lines: self.parallel.batch_lines,
        }
    }

    pub fn reading_overrides(&self) -> &HashMap<char, Vec<String>> {
        &self.readings_parsed
    }
}

/// Parse a settings file, overlaying it on the embedded defaults.
pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut base: toml::Table = DEFAULT_SETTINGS_TOML
        .parse()
        .map_err(|e: toml::de::Error| SettingsError::Parse(e.to_string()))?;
    let overlay: toml::Table = toml_str
        .parse()
        .map_err(|e: toml::de::Error| SettingsError::Parse(e.to_string()))?;
    merge_tables(&mut base, overlay);

    let mut s: Settings = toml::Value::Table(base)
        .try_into()
        .map_err(|e: toml::de::Error| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.readings_parsed = parse_readings(&s.readings)?;
    Ok(s)
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(dst)), toml::Value::Table(src)) => merge_tables(dst, src),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn parse_readings(
    raw: &BTreeMap<String, Vec<String>>,
) -> Result<HashMap<char, Vec<String>>, SettingsError> {
    let mut result = HashMap::with_capacity(raw.len());
    for (key, values) in raw {
        let invalid = |reason: &str| SettingsError::InvalidValue {
            field: format!("readings.{key}"),
            reason: reason.to_string(),
        };
        let mut chars = key.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(invalid("key must be a single character")),
        };
        if !is_han(c) {
            return Err(invalid("key must be a Han character"));
        }
        match values.first() {
            None => return Err(invalid("reading list is empty")),
            Some(first) if first.is_empty() => return Err(invalid("first reading is empty")),
            Some(_) => {}
        }
        result.insert(c, values.clone());
    }
    Ok(result)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(input.max_line_bytes);
    check_positive_usize!(parallel.jobs);
    check_positive_usize!(parallel.batch_lines);

    Ok(())
}
