use std::fs;

use andaluh::settings::{default_toml, parse_settings_toml};

use super::die;

pub fn settings_export() {
    print!("{}", default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: epa.vaf={}, epa.vvf={}, epa.escape_links={}, epa.debug={}",
        s.epa.vaf, s.epa.vvf, s.epa.escape_links, s.epa.debug
    );
}
