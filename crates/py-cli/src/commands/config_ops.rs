use std::path::Path;

use py_core::settings::{self, Settings};

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &Path) {
    let s = die!(Settings::load(Some(file)), "Error: {}");
    println!(
        "OK: input.max_line_bytes={}, parallel.jobs={}, parallel.batch_lines={}, readings={}",
        s.input.max_line_bytes,
        s.parallel.jobs,
        s.parallel.batch_lines,
        s.reading_overrides().len()
    );
}
