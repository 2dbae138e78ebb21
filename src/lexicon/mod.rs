//! Exception dictionaries and the digraph table.
//!
//! The data ships embedded (`default_lexicon.toml`) and is parsed once into
//! a process-wide read-only [`Lexicon`]. Every map stores lowercase keys and
//! lowercase replacements; callers look words up case-insensitively and
//! re-case the result with [`crate::case::keep_case`].

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_LEXICON_TOML: &str = include_str!("default_lexicon.toml");

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[{table}] entry {key:?}: {reason}")]
    InvalidEntry {
        table: &'static str,
        key: String,
        reason: &'static str,
    },
    #[error("digraph {0:?} must be exactly two characters")]
    InvalidDigraph(String),
}

#[derive(Deserialize)]
struct LexiconConfig {
    digraphs: Vec<String>,
    h: HashMap<String, String>,
    gj: HashMap<String, String>,
    v: HashMap<String, String>,
    ll: HashMap<String, String>,
    wordend_d: HashMap<String, String>,
    wordend_s: HashMap<String, String>,
    wordend_const: HashMap<String, String>,
    wordend_d_intervowel: HashMap<String, String>,
    global: HashMap<String, String>,
}

/// Which rule family an exception map belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionTable {
    H,
    Gj,
    V,
    Ll,
    WordEndD,
    WordEndS,
    WordEndConsonant,
    WordEndIntervocalicD,
    Global,
}

#[derive(Debug)]
pub struct Lexicon {
    digraphs: Vec<String>,
    h: HashMap<String, String>,
    gj: HashMap<String, String>,
    v: HashMap<String, String>,
    ll: HashMap<String, String>,
    wordend_d: HashMap<String, String>,
    wordend_s: HashMap<String, String>,
    wordend_const: HashMap<String, String>,
    wordend_d_intervowel: HashMap<String, String>,
    global: HashMap<String, String>,
}

impl Lexicon {
    /// The embedded lexicon, parsed on first use.
    pub fn global() -> &'static Lexicon {
        static INSTANCE: OnceLock<Lexicon> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            parse_lexicon_toml(DEFAULT_LEXICON_TOML).expect("embedded lexicon TOML must be valid")
        })
    }

    fn table(&self, table: ExceptionTable) -> &HashMap<String, String> {
        match table {
            ExceptionTable::H => &self.h,
            ExceptionTable::Gj => &self.gj,
            ExceptionTable::V => &self.v,
            ExceptionTable::Ll => &self.ll,
            ExceptionTable::WordEndD => &self.wordend_d,
            ExceptionTable::WordEndS => &self.wordend_s,
            ExceptionTable::WordEndConsonant => &self.wordend_const,
            ExceptionTable::WordEndIntervocalicD => &self.wordend_d_intervowel,
            ExceptionTable::Global => &self.global,
        }
    }

    /// Case-insensitive lookup; the returned replacement is lowercase.
    pub fn lookup(&self, table: ExceptionTable, word: &str) -> Option<&str> {
        self.table(table)
            .get(&word.to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self, table: ExceptionTable) -> usize {
        self.table(table).len()
    }

    /// Lowercase two-character clusters, in table order, without duplicates.
    pub fn digraphs(&self) -> &[String] {
        &self.digraphs
    }
}

/// Parse and validate lexicon TOML.
pub fn parse_lexicon_toml(toml_str: &str) -> Result<Lexicon, LexiconError> {
    let config: LexiconConfig =
        toml::from_str(toml_str).map_err(|e| LexiconError::Parse(e.to_string()))?;

    let mut digraphs: Vec<String> = Vec::with_capacity(config.digraphs.len());
    for d in &config.digraphs {
        if d.chars().count() != 2 {
            return Err(LexiconError::InvalidDigraph(d.clone()));
        }
        // Matching is case-insensitive, so "bç" and "bÇ" collapse.
        let lower = d.to_lowercase();
        if !digraphs.contains(&lower) {
            digraphs.push(lower);
        }
    }

    let tables = [
        ("h", &config.h),
        ("gj", &config.gj),
        ("v", &config.v),
        ("ll", &config.ll),
        ("wordend_d", &config.wordend_d),
        ("wordend_s", &config.wordend_s),
        ("wordend_const", &config.wordend_const),
        ("wordend_d_intervowel", &config.wordend_d_intervowel),
        ("global", &config.global),
    ];
    for (table, map) in tables {
        validate_table(table, map)?;
    }

    Ok(Lexicon {
        digraphs,
        h: config.h,
        gj: config.gj,
        v: config.v,
        ll: config.ll,
        wordend_d: config.wordend_d,
        wordend_s: config.wordend_s,
        wordend_const: config.wordend_const,
        wordend_d_intervowel: config.wordend_d_intervowel,
        global: config.global,
    })
}

fn validate_table(table: &'static str, map: &HashMap<String, String>) -> Result<(), LexiconError> {
    for (key, value) in map {
        let invalid = |reason| LexiconError::InvalidEntry {
            table,
            key: key.clone(),
            reason,
        };
        if key.is_empty() || value.is_empty() {
            return Err(invalid("empty key or value"));
        }
        if key.to_lowercase() != *key {
            return Err(invalid("key must be lowercase"));
        }
        if value.to_lowercase() != *value {
            return Err(invalid("replacement must be lowercase"));
        }
    }
    Ok(())
}
