use super::scan::map_words;
use super::Rule;
use crate::case::keep_case;
use crate::error::TransliterationError;
use crate::lexicon::{ExceptionTable, Lexicon};
use crate::settings::Options;

/// Whole-word overrides for forms the phonological rules cannot derive.
pub(crate) struct ExceptionRule;

impl Rule for ExceptionRule {
    fn name(&self) -> &'static str {
        "exception"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let lexicon = Lexicon::global();
        map_words(text, |word| {
            Ok(lexicon
                .lookup(ExceptionTable::Global, word)
                .map(|replacement| keep_case(word, replacement)))
        })
    }
}
