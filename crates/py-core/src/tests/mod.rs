
use crate::config::{Config, RawFlags};

pub(super) fn upper_config(keep_non_han: bool) -> Config {
    RawFlags {
        upper: true,
        upper_explicit: true,
        lower: true,
        keep_non_han,
    }
    .resolve()
}

pub(super) fn lower_config(keep_non_han: bool) -> Config {
    RawFlags {
        keep_non_han,
        ..RawFlags::default()
    }
    .resolve()
}
