use pinyin::ToPinyinMulti;

use super::{OracleError, ReadingOracle};

/// Readings from the `pinyin` crate's heteronym table, as toneless lower-case
/// spellings. The table's default reading comes first.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinOracle;

impl PinyinOracle {
    pub fn new() -> Self {
        Self
    }
}

impl ReadingOracle for PinyinOracle {
    fn readings(&self, c: char) -> Result<Vec<&str>, OracleError> {
        let Some(multi) = c.to_pinyin_multi() else {
            return Ok(Vec::new());
        };
        Ok(multi.into_iter().map(|p| p.plain()).collect())
    }
}
