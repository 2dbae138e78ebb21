use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::scan::{compile, map_words};
use super::Rule;
use crate::case::keep_case;
use crate::error::TransliterationError;
use crate::lexicon::{ExceptionTable, Lexicon};
use crate::settings::Options;

static LL_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(l)(l)"));

/// `ll` → `y`, upper-case when the first `l` is.
pub(crate) struct LlRule;

impl Rule for LlRule {
    fn name(&self) -> &'static str {
        "ll"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let lexicon = Lexicon::global();
        map_words(text, |word| {
            if !LL_RE.is_match(word) {
                return Ok(None);
            }
            if let Some(replacement) = lexicon.lookup(ExceptionTable::Ll, word) {
                return Ok(Some(keep_case(word, replacement)));
            }
            let word = LL_RE.replace_all(word, |caps: &Captures<'_>| {
                if &caps[1] == "L" {
                    "Y"
                } else {
                    "y"
                }
            });
            Ok(Some(word.into_owned()))
        })
    }
}
