//! Consonant-cluster assimilation.
//!
//! A vowel followed by a two-consonant cluster from the lexicon's digraph
//! table is circumflexed, the first consonant drops and the second doubles
//! (`abstracto` → `âttrâtto`). Four narrower cluster families run first.

use std::sync::{LazyLock, OnceLock};

use regex::{Captures, Regex};

use super::scan::{compile, first_char, try_replace_all};
use super::Rule;
use crate::error::TransliterationError;
use crate::lexicon::Lexicon;
use crate::settings::Options;
use crate::unicode::{circumflex_of, fold};

const VOWEL: &str = "[aeiouáéíóú]";
const CONSONANT: &str = "[bcçdfghjklmnpqstvwxyz]";

// -lst-/-rst- (`cárstico` → `cárttico`)
static LR_ST_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("(?i)({VOWEL})([lr])(s)(t)")));
// trans-/post- before a consonant
static TRANS_POST_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("(?i)(tr|p)([ao])(ns|st)({CONSONANT})")));
// vowel + b/d/n/r + s + consonant (`adscrito` → `âccrito`)
static BDNR_S_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("(?i)({VOWEL})([bdnr])(s)({CONSONANT})")));
// vowel + consonant + l (`atlántico` → `âl-lántico`)
static CONSONANT_L_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("(?i)({VOWEL})([djrstxz])(l)")));

fn general_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let clusters: Vec<String> = Lexicon::global()
            .digraphs()
            .iter()
            .map(|d| regex::escape(d))
            .collect();
        compile(&format!("(?i)({VOWEL})({})", clusters.join("|")))
    })
}

pub(crate) struct DigraphRule;

impl Rule for DigraphRule {
    fn name(&self) -> &'static str {
        "digraph"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let text = try_replace_all(&LR_ST_RE, text, |caps: &Captures<'_>| {
            Ok(format!("{}{}{t}{t}", &caps[1], &caps[2], t = &caps[4]))
        })?;

        let text = try_replace_all(&TRANS_POST_RE, &text, |caps: &Captures<'_>| {
            let vowel = circumflex_of(first_char(&caps[2]))?;
            let consonant = &caps[4];
            let cluster = if fold(first_char(consonant)) == 'l' {
                format!("{consonant}-{consonant}")
            } else {
                consonant.repeat(2)
            };
            Ok(format!("{}{vowel}{cluster}", &caps[1]))
        })?;

        let text = try_replace_all(&BDNR_S_RE, &text, |caps: &Captures<'_>| {
            let doubled = caps[4].repeat(2);
            if fold(first_char(&caps[2])) == 'r' {
                Ok(format!("{}{}{doubled}", &caps[1], &caps[2]))
            } else {
                Ok(format!("{}{doubled}", circumflex_of(first_char(&caps[1]))?))
            }
        })?;

        let text = try_replace_all(&CONSONANT_L_RE, &text, |caps: &Captures<'_>| {
            let l = &caps[3];
            Ok(format!("{}{l}-{l}", circumflex_of(first_char(&caps[1]))?))
        })?;

        try_replace_all(general_re(), &text, |caps: &Captures<'_>| {
            let vowel = circumflex_of(first_char(&caps[1]))?;
            let kept = caps[2].chars().nth(1).unwrap_or_default();
            Ok(format!("{vowel}{kept}{kept}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digraph(text: &str) -> String {
        DigraphRule.apply(text, &Options::default()).unwrap()
    }

    #[test]
    fn test_lst_rst() {
        assert_eq!(digraph("cárstico"), "cárttico");
        assert_eq!(digraph("çorstiçio"), "çorttiçio");
    }

    #[test]
    fn test_trans_post() {
        assert_eq!(digraph("aerotransporte"), "aerotrâpporte");
        assert_eq!(digraph("translado"), "trâl-lado");
        assert_eq!(digraph("postpalatal"), "pôppalatal");
        assert_eq!(digraph("TRANSPORTE"), "TRÂPPORTE");
    }

    #[test]
    fn test_bdnr_s() {
        assert_eq!(digraph("adscrito"), "âccrito");
        assert_eq!(digraph("perspectiba"), "perppêttiba");
    }

    #[test]
    fn test_consonant_l() {
        assert_eq!(digraph("atlántico"), "âl-lántico");
        assert_eq!(digraph("orla"), "ôl-la");
        assert_eq!(digraph("ISLA"), "ÎL-LA");
    }

    #[test]
    fn test_general() {
        assert_eq!(digraph("abstracto"), "âttrâtto");
        assert_eq!(digraph("ABSTRACTO"), "ÂTTRÂTTO");
        assert_eq!(digraph("éxtaçî"), "éttaçî");
        assert_eq!(digraph("postoperatorio"), "pôttoperatorio");
        assert_eq!(digraph("casa"), "casa");
    }
}
