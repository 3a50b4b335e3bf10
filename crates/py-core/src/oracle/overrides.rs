use std::collections::HashMap;

use super::{OracleError, ReadingOracle};

/// Consults a table of pinned readings before falling back to `inner`.
///
/// Used for characters whose default reading is wrong in a given context,
/// typically surnames (单 → shan, 曾 → zeng).
pub struct OverrideOracle<O> {
    overrides: HashMap<char, Vec<String>>,
    inner: O,
}

impl<O: ReadingOracle> OverrideOracle<O> {
    pub fn new(inner: O, overrides: HashMap<char, Vec<String>>) -> Self {
        Self { overrides, inner }
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<O: ReadingOracle> ReadingOracle for OverrideOracle<O> {
    fn readings(&self, c: char) -> Result<Vec<&str>, OracleError> {
        match self.overrides.get(&c) {
            Some(pinned) => Ok(pinned.iter().map(String::as_str).collect()),
            None => self.inner.readings(c),
        }
    }
}
