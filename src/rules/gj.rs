use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::scan::{compile, first_char, map_words, replace_unless_preceded};
use super::Rule;
use crate::case::keep_case;
use crate::error::TransliterationError;
use crate::lexicon::{ExceptionTable, Lexicon};
use crate::settings::Options;
use crate::unicode::{cased_like, marker_for};

static FRONT_TRIGGER_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)[gj][eiéí]"));
static BACK_TRIGGER_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)j[aouáóú]"));
static FRONT_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(g|j)(e|i|é|í)"));
static BACK_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(j)(a|o|u|á|ó|ú)"));

// Case-sensitive: the silent `u` and the diaeresis keep their own case.
static GU_LOWER_RE: LazyLock<Regex> = LazyLock::new(|| compile("(gu|gU)(e|i|é|í|E|I|É|Í)"));
static GU_UPPER_RE: LazyLock<Regex> = LazyLock::new(|| compile("(Gu|GU)(e|i|é|í|E|I|É|Í)"));
static GUE_DIAERESIS_RE: LazyLock<Regex> = LazyLock::new(|| compile("(g|G)(ü)(e|i|é|í|E|I|É|Í)"));
static GUE_DIAERESIS_UPPER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile("(g|G)(Ü)(e|i|é|í|E|I|É|Í)"));

static BUEN_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(b)(uen)"));
static BUE_LS_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(b)(ue[ls])"));

/// /x/ and the velar cluster family.
///
/// - `ge`, `gi`, `je`, `ji`, `ja`, `jo`, `ju` → VVF + vowel
/// - `gue`/`gui` drop the silent `u`; `güe`/`güi` lose the diaeresis
/// - `buen` → `guen`; `bue` + `l`/`s` → `gue` unless after `m`
pub(crate) struct GjRule;

impl Rule for GjRule {
    fn name(&self) -> &'static str {
        "gj"
    }

    fn apply(&self, text: &str, options: &Options) -> Result<String, TransliterationError> {
        let vvf = options.vvf;
        let text = map_words(text, |word| Ok(velarize_word(word, &FRONT_TRIGGER_RE, vvf)))?;
        let text = map_words(&text, |word| Ok(velarize_word(word, &BACK_TRIGGER_RE, vvf)))?;

        let text = GU_LOWER_RE.replace_all(&text, "g$2");
        let text = GU_UPPER_RE.replace_all(&text, "G$2");
        let text = GUE_DIAERESIS_RE.replace_all(&text, "${1}u$3");
        let text = GUE_DIAERESIS_UPPER_RE.replace_all(&text, "${1}U$3");

        let text = BUEN_RE.replace_all(&text, |caps: &Captures<'_>| {
            format!("{}{}", cased_like('g', first_char(&caps[1])), &caps[2])
        });
        Ok(replace_unless_preceded(
            &BUE_LS_RE,
            &text,
            &['m', 'M'],
            |caps: &Captures<'_>| format!("{}{}", keep_case(&caps[1], "g"), &caps[2]),
        ))
    }
}

fn velarize_word(word: &str, trigger: &Regex, vvf: char) -> Option<String> {
    if !trigger.is_match(word) {
        return None;
    }
    if let Some(replacement) = Lexicon::global().lookup(ExceptionTable::Gj, word) {
        return Some(keep_case(word, replacement));
    }
    let velar = |caps: &Captures<'_>| {
        format!("{}{}", marker_for(vvf, first_char(&caps[1])), &caps[2])
    };
    let word = FRONT_RE.replace_all(word, velar);
    Some(BACK_RE.replace_all(&word, velar).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gj(text: &str) -> String {
        GjRule.apply(text, &Options::default()).unwrap()
    }

    #[test]
    fn test_velar_fricative() {
        assert_eq!(gj("gente"), "hente");
        assert_eq!(gj("jirafa"), "hirafa");
        assert_eq!(gj("Jamón"), "Hamón");
        assert_eq!(gj("GIJÓN"), "HIHÓN");
        assert_eq!(gj("ajo"), "aho");
    }

    #[test]
    fn test_exceptions() {
        assert_eq!(gj("gin"), "yin");
        assert_eq!(gj("Jazz"), "Yâh");
        assert_eq!(gj("JET"), "YÊH");
    }

    #[test]
    fn test_silent_u_and_diaeresis() {
        assert_eq!(gj("guerra"), "gerra");
        assert_eq!(gj("Guijarrito"), "Giharrito");
        assert_eq!(gj("GUISO"), "GISO");
        assert_eq!(gj("pingüino"), "pinguino");
        assert_eq!(gj("PINGÜINO"), "PINGUINO");
    }

    #[test]
    fn test_bue_family() {
        assert_eq!(gj("buenos"), "guenos");
        assert_eq!(gj("Abuelo"), "Aguelo");
        assert_eq!(gj("SABUESOS"), "SAGUESOS");
        assert_eq!(gj("ambuesa"), "ambuesa");
        assert_eq!(gj("bueno"), "gueno");
    }

    #[test]
    fn test_custom_vvf() {
        let options = Options {
            vvf: 'x',
            ..Options::default()
        };
        assert_eq!(GjRule.apply("Gente joven", &options).unwrap(), "Xente xoven");
    }
}
