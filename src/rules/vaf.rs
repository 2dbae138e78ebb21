use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::scan::{compile, first_char};
use super::Rule;
use crate::error::TransliterationError;
use crate::settings::Options;
use crate::unicode::marker_for;

static SZ_VOWEL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile("(?i)([zs])([aeiouáéíóúâêîôû])"));
static C_FRONT_VOWEL_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(c)([eiéíêî])"));

/// /s/ and /θ/ neutralization: `s`, `z` before a vowel and `c` before a
/// front vowel become the VAF letter.
pub(crate) struct VafRule;

impl Rule for VafRule {
    fn name(&self) -> &'static str {
        "vaf"
    }

    fn apply(&self, text: &str, options: &Options) -> Result<String, TransliterationError> {
        let vaf = |caps: &Captures<'_>| {
            format!("{}{}", marker_for(options.vaf, first_char(&caps[1])), &caps[2])
        };
        let text = SZ_VOWEL_RE.replace_all(text, vaf);
        Ok(C_FRONT_VOWEL_RE.replace_all(&text, vaf).into_owned())
    }
}
