use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use andaluh::{explain, format_text, transliterate, transliterate_bytes, Options, Settings};

use super::die;

/// Flags that override the `[epa]` settings.
#[derive(Debug, Default, Clone)]
pub struct OptionOverrides {
    pub vaf: Option<char>,
    pub vvf: Option<char>,
    pub escape_links: bool,
    pub debug: bool,
}

/// Options from `config` (or the defaults) with command-line flags on top.
pub fn resolve_options(config: Option<&Path>, overrides: &OptionOverrides) -> Options {
    let mut options = match config {
        Some(path) => {
            die!(Settings::load(path), "Error loading {}: {}", path.display()).epa
        }
        None => Options::default(),
    };
    if let Some(vaf) = overrides.vaf {
        options.vaf = vaf;
    }
    if let Some(vvf) = overrides.vvf {
        options.vvf = vvf;
    }
    options.escape_links |= overrides.escape_links;
    options.debug |= overrides.debug;
    options
}

/// Transliterate `text`, else the contents of `file`, else stdin line by line.
pub fn epa_cmd(text: Option<&str>, file: Option<&str>, options: &Options) {
    if let Some(text) = text {
        println!("{}", die!(transliterate(text, options), "Error: {}"));
        return;
    }
    if let Some(file) = file {
        let bytes = die!(fs::read(file), "Error reading {file}: {}");
        print!("{}", die!(transliterate_bytes(&bytes, options), "Error in {file}: {}"));
        return;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut line = Vec::new();
    let mut input = stdin.lock();
    loop {
        line.clear();
        let n = die!(input.read_until(b'\n', &mut line), "Error reading stdin: {}");
        if n == 0 {
            break;
        }
        let epa = die!(transliterate_bytes(&line, options), "Error: {}");
        die!(out.write_all(epa.as_bytes()), "Error writing output: {}");
    }
    die!(out.flush(), "Error writing output: {}");
}

pub fn explain_cmd(text: &str, options: &Options, json: bool) {
    let explanation = die!(explain(text, options), "Error: {}");
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&explanation).expect("JSON serialization failed")
        );
    } else {
        print!("{}", format_text(&explanation));
    }
}
