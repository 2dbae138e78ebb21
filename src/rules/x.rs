use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::scan::{compile, first_char, try_replace_all};
use super::Rule;
use crate::error::TransliterationError;
use crate::settings::Options;
use crate::unicode::{circumflex_of, is_word_char, marker_for};

static INTERVOCALIC_X_RE: LazyLock<Regex> =
    LazyLock::new(|| compile("(?i)([aeiouáéíóú])(x)([aeiouyáéíóú])"));

/// /ks/ spelled `x`.
///
/// Between vowels the preceding vowel is circumflexed and the `x` becomes a
/// doubled VAF (`éxito` → `éççito`); at the start of a word it becomes a
/// single VAF (`xilófono` → `çilófono`).
pub(crate) struct XRule;

impl Rule for XRule {
    fn name(&self) -> &'static str {
        "x"
    }

    fn apply(&self, text: &str, options: &Options) -> Result<String, TransliterationError> {
        let vaf = options.vaf;
        let text = try_replace_all(&INTERVOCALIC_X_RE, text, |caps: &Captures<'_>| {
            let vowel = first_char(&caps[1]);
            let x = first_char(&caps[2]);
            let marker = marker_for(vaf, x);
            Ok(format!("{}{marker}{marker}{}", circumflex_of(vowel)?, &caps[3]))
        })?;

        let mut out = String::with_capacity(text.len());
        let mut previous: Option<char> = None;
        for c in text.chars() {
            let word_start = previous.map_or(true, |p| !is_word_char(p));
            if matches!(c, 'x' | 'X') && word_start {
                out.push_str(&marker_for(vaf, c));
            } else {
                out.push(c);
            }
            previous = Some(c);
        }
        Ok(out)
    }
}
