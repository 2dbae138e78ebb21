use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::scan::compile;
use super::Rule;
use crate::error::TransliterationError;
use crate::settings::Options;

static PSIC_PSEUD_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(psic|pseud)"));

/// Silent `p` in `psic-` and `pseud-`.
pub(crate) struct PsicoRule;

impl Rule for PsicoRule {
    fn name(&self) -> &'static str {
        "psico_pseudo"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let out = PSIC_PSEUD_RE.replace_all(text, |caps: &Captures<'_>| {
            let mut chars = caps[1].chars();
            let p = chars.next();
            if p == Some('p') {
                chars.collect::<String>()
            } else {
                // An upper-case `P` hands its case to the new initial.
                let mut out: String = chars.next().into_iter().flat_map(char::to_uppercase).collect();
                out.extend(chars);
                out
            }
        });
        Ok(out.into_owned())
    }
}
