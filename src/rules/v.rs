use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::scan::{compile, map_words};
use super::Rule;
use crate::case::keep_case;
use crate::error::TransliterationError;
use crate::lexicon::{ExceptionTable, Lexicon};
use crate::settings::Options;

static NV_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)nv"));

/// `v` → `b`, with `nv` → `mb` assimilation (`envidia` → `embidia`).
pub(crate) struct VRule;

impl Rule for VRule {
    fn name(&self) -> &'static str {
        "v"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let lexicon = Lexicon::global();
        map_words(text, |word| {
            if !word.contains(['v', 'V']) {
                return Ok(None);
            }
            if let Some(replacement) = lexicon.lookup(ExceptionTable::V, word) {
                return Ok(Some(keep_case(word, replacement)));
            }
            let word = NV_RE.replace_all(word, |caps: &Captures<'_>| keep_case(&caps[0], "mb"));
            Ok(Some(word.replace('v', "b").replace('V', "B")))
        })
    }
}
