//! Resolution of the raw case/passthrough flags into an immutable `Config`.
//!
//! Lower case is the default mode. The only way to leave it is an explicit
//! upper-case request: `lower = false` on its own has no effect. Callers pass
//! whether `upper` was set explicitly (e.g. given on the command line) so the
//! rule can be applied in one place instead of at every use site.

/// Case applied to the emitted initial letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    #[default]
    Lower,
    Upper,
}

impl CaseMode {
    /// Map a single letter into this case. Multi-char case mappings keep only
    /// the first char so one input letter always yields one output char.
    pub fn apply(self, c: char) -> char {
        if c.is_ascii() {
            return match self {
                CaseMode::Lower => c.to_ascii_lowercase(),
                CaseMode::Upper => c.to_ascii_uppercase(),
            };
        }
        let mapped = match self {
            CaseMode::Lower => c.to_lowercase().next(),
            CaseMode::Upper => c.to_uppercase().next(),
        };
        mapped.unwrap_or(c)
    }
}

/// Flags as decoded by the front-end, before precedence is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFlags {
    pub upper: bool,
    /// `upper` was set by the user rather than left at its default.
    pub upper_explicit: bool,
    pub lower: bool,
    pub keep_non_han: bool,
}

impl Default for RawFlags {
    fn default() -> Self {
        Self {
            upper: false,
            upper_explicit: false,
            lower: true,
            keep_non_han: true,
        }
    }
}

impl RawFlags {
    pub fn resolve(self) -> Config {
        let case = if self.upper_explicit && self.upper {
            CaseMode::Upper
        } else {
            CaseMode::Lower
        };
        Config {
            case,
            // An explicit upper-case request switches the lower flag off.
            lower_explicit: case == CaseMode::Lower && self.lower,
            keep_non_han: self.keep_non_han,
        }
    }
}

/// Resolved, read-only settings shared by every line conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    case: CaseMode,
    lower_explicit: bool,
    keep_non_han: bool,
}

impl Default for Config {
    fn default() -> Self {
        RawFlags::default().resolve()
    }
}

impl Config {
    pub fn case(&self) -> CaseMode {
        self.case
    }

    pub fn uppercase_initials(&self) -> bool {
        self.case == CaseMode::Upper
    }

    /// State of the lower-case flag after precedence. Informational only: the
    /// case actually applied is `case()`.
    pub fn lowercase_requested_explicitly(&self) -> bool {
        self.lower_explicit
    }

    pub fn keep_non_han_characters(&self) -> bool {
        self.keep_non_han
    }
}
