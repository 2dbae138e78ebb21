use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::scan::compile;
use super::Rule;
use crate::error::TransliterationError;
use crate::settings::Options;

static L_BEFORE_CONSONANT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile("(?i)(l)([bcçgsdfghkmpqrtxz])"));

/// /l/ → /r/ rotation before a consonant (`alto` → `arto`).
pub(crate) struct LRule;

impl Rule for LRule {
    fn name(&self) -> &'static str {
        "l"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let out = L_BEFORE_CONSONANT_RE.replace_all(text, |caps: &Captures<'_>| {
            let r = if &caps[1] == "L" { "R" } else { "r" };
            format!("{r}{}", &caps[2])
        });
        Ok(out.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l_rotation() {
        let l = |t: &str| LRule.apply(t, &Options::default()).unwrap();
        assert_eq!(l("alto"), "arto");
        assert_eq!(l("ALGO"), "ARGO");
        assert_eq!(l("alçar"), "arçar");
        assert_eq!(l("Alrededor"), "Arrededor");
        assert_eq!(l("ala ley"), "ala ley");
        assert_eq!(l("el barco"), "el barco");
    }
}
