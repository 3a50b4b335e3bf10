//! Phonetic reading lookup for single Han characters.
//!
//! `PinyinOracle` answers from the bundled pinyin table. `OverrideOracle`
//! layers user-pinned readings on top of another oracle.

#[cfg(test)]
mod map;
mod overrides;
mod table;

#[cfg(test)]
pub(crate) use map::MapOracle;
pub use overrides::OverrideOracle;
pub use table::PinyinOracle;

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("reading lookup failed for {ch:?}: {reason}")]
    Lookup { ch: char, reason: String },
}

pub trait ReadingOracle: Send + Sync {
    /// Candidate spellings for `c`, most preferred first. An empty list means
    /// the character is unknown.
    fn readings(&self, c: char) -> Result<Vec<&str>, OracleError>;

    /// The preferred spelling, if any.
    fn primary_reading(&self, c: char) -> Result<Option<&str>, OracleError> {
        Ok(self.readings(c)?.into_iter().next())
    }
}
