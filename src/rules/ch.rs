use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::scan::compile;
use super::Rule;
use crate::error::TransliterationError;
use crate::settings::Options;

static CH_RE: LazyLock<Regex> = LazyLock::new(|| compile("(?i)(c)(h)"));

/// `ch` → `x`, upper-case when the `c` is.
pub(crate) struct ChRule;

impl Rule for ChRule {
    fn name(&self) -> &'static str {
        "ch"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let out = CH_RE.replace_all(text, |caps: &Captures<'_>| {
            if &caps[1] == "C" {
                "X"
            } else {
                "x"
            }
        });
        Ok(out.into_owned())
    }
}
