use std::collections::{HashMap, HashSet};

use super::{OracleError, ReadingOracle};

/// In-memory reading table for tests, with injectable lookup failures.
#[derive(Debug, Clone, Default)]
pub struct MapOracle {
    entries: HashMap<char, Vec<String>>,
    failing: HashSet<char>,
}

impl MapOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// One reading per character.
    pub fn from_pairs(pairs: &[(char, &str)]) -> Self {
        let mut oracle = Self::new();
        for &(c, reading) in pairs {
            oracle.insert(c, vec![reading.to_string()]);
        }
        oracle
    }

    pub fn with_readings(mut self, c: char, readings: &[&str]) -> Self {
        self.insert(c, readings.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn insert(&mut self, c: char, readings: Vec<String>) {
        self.entries.insert(c, readings);
    }

    /// Make lookups of `c` return an error.
    pub fn fail_on(&mut self, c: char) {
        self.failing.insert(c);
    }
}

impl ReadingOracle for MapOracle {
    fn readings(&self, c: char) -> Result<Vec<&str>, OracleError> {
        if self.failing.contains(&c) {
            return Err(OracleError::Lookup {
                ch: c,
                reason: "marked as failing".to_string(),
            });
        }
        Ok(self
            .entries
            .get(&c)
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default())
    }
}
