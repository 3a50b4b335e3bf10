//! Per-line conversion of Han characters to the initial letters of their
//! readings.
//!
//! Each Han character contributes the first letter of its preferred reading,
//! cased per `Config::case()`. A Han character the oracle cannot read (or
//! whose lookup fails) contributes nothing. Other characters are copied or
//! dropped according to `Config::keep_non_han_characters()`. Lines are
//! independent: there is no state carried from one call to the next.

use std::iter::FusedIterator;
use std::str::Chars;

use tracing::debug;

use crate::config::Config;
use crate::oracle::ReadingOracle;
use crate::script::is_han;

#[derive(Clone, Copy)]
pub struct Transliterator<'a> {
    config: &'a Config,
    oracle: &'a dyn ReadingOracle,
}

impl<'a> Transliterator<'a> {
    pub fn new(config: &'a Config, oracle: &'a dyn ReadingOracle) -> Self {
        Self { config, oracle }
    }

    /// Lazily yield the output characters for `line`, in input order.
    pub fn initials<'s>(&'s self, line: &'s str) -> Initials<'s> {
        Initials {
            chars: line.chars(),
            config: self.config,
            oracle: self.oracle,
        }
    }

    pub fn convert(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        out.extend(self.initials(line));
        out
    }
}

/// Convert one line with a one-off `Transliterator`.
pub fn convert_line(line: &str, config: &Config, oracle: &dyn ReadingOracle) -> String {
    Transliterator::new(config, oracle).convert(line)
}

pub struct Initials<'a> {
    chars: Chars<'a>,
    config: &'a Config,
    oracle: &'a dyn ReadingOracle,
}

impl Iterator for Initials<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            let c = self.chars.next()?;
            if is_han(c) {
                if let Some(letter) = leading_letter(self.oracle, c) {
                    return Some(self.config.case().apply(letter));
                }
            } else if self.config.keep_non_han_characters() {
                return Some(c);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.chars.size_hint().1)
    }
}

impl FusedIterator for Initials<'_> {}

fn leading_letter(oracle: &dyn ReadingOracle, c: char) -> Option<char> {
    match oracle.primary_reading(c) {
        Ok(Some(reading)) => {
            let letter = reading.chars().next();
            if letter.is_none() {
                debug!(ch = %c, "empty reading, dropped");
            }
            letter
        }
        Ok(None) => {
            debug!(ch = %c, "no reading, dropped");
            None
        }
        Err(e) => {
            debug!("{e}, dropped");
            None
        }
    }
}
