use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::scan::{compile, map_words, replace_unless_preceded};
use super::Rule;
use crate::case::keep_case;
use crate::error::TransliterationError;
use crate::lexicon::{ExceptionTable, Lexicon};
use crate::settings::Options;
use crate::unicode::cased_like;

static HUA_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(h)(ua)"));
static HUE_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(h)(u)(e)"));

const CH_GUARD: &[char] = &['c', 'C'];

/// Mute /h/ elision.
///
/// `hua` and `hue` become `gua`/`güe` first (`chihuahua` → `chiguagua`), then
/// every remaining `h` that is not part of `ch` is dropped from its word.
pub(crate) struct HRule;

impl Rule for HRule {
    fn name(&self) -> &'static str {
        "h"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let text = replace_unless_preceded(&HUA_RE, text, CH_GUARD, |caps: &Captures<'_>| {
            format!("{}{}", g_for(&caps[1]), &caps[2])
        });
        let text = replace_unless_preceded(&HUE_RE, &text, CH_GUARD, |caps: &Captures<'_>| {
            format!("{}{}{}", g_for(&caps[1]), keep_case(&caps[2], "ü"), &caps[3])
        });

        let lexicon = Lexicon::global();
        map_words(&text, |word| {
            if !word.contains(['h', 'H']) {
                return Ok(None);
            }
            if let Some(replacement) = lexicon.lookup(ExceptionTable::H, word) {
                return Ok(Some(keep_case(word, replacement)));
            }
            Ok(Some(elide_h(word)))
        })
    }
}

fn g_for(h: &str) -> &'static str {
    if h == "H" {
        "G"
    } else {
        "g"
    }
}

// Drop every `h` not after `c`. The char following it is re-cased like the
// `h`; a trailing `h` just goes.
fn elide_h(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let after_c = i > 0 && CH_GUARD.contains(&chars[i - 1]);
        if matches!(c, 'h' | 'H') && !after_c {
            if let Some(&next) = chars.get(i + 1) {
                out.push_str(&cased_like(next, c));
            }
            i += 2;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(text: &str) -> String {
        HRule.apply(text, &Options::default()).unwrap()
    }

    #[test]
    fn test_hua_hue() {
        assert_eq!(h("chihuahua"), "chiguagua");
        assert_eq!(h("CHIHUAHUA"), "CHIGUAGUA");
        assert_eq!(h("cacahuete"), "cacagüete");
        assert_eq!(h("HUEVO"), "GÜEVO");
    }

    #[test]
    fn test_mute_h() {
        assert_eq!(h("hola"), "ola");
        assert_eq!(h("Hola HOLA"), "Ola OLA");
        assert_eq!(h("búho"), "búo");
        assert_eq!(h("[haber]"), "[aber]");
        assert_eq!(h("ahí"), "aí");
    }

    #[test]
    fn test_h_next_char_takes_h_case() {
        assert_eq!(h("hOla"), "ola");
        assert_eq!(h("aHa"), "aA");
    }

    #[test]
    fn test_ch_untouched() {
        assert_eq!(h("chocho Chungo"), "chocho Chungo");
    }

    #[test]
    fn test_exceptions() {
        assert_eq!(h("haz"), "âh");
        assert_eq!(h("Hoz"), "Ôh");
        assert_eq!(h("HEZ"), "ÊH");
    }

    #[test]
    fn test_no_h_is_noop() {
        let text = "Todo Xenomorfo dice: que el Éxito y el éxtasis asfixian";
        assert_eq!(h(text), text);
    }
}
