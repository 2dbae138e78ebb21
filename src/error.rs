use std::str::Utf8Error;

/// Errors surfaced by [`crate::transliterate`] and the accent utilities.
///
/// None of these are recoverable mid-pipeline: a failure aborts the whole
/// transliteration and no partial output is returned.
#[derive(Debug, thiserror::Error)]
pub enum TransliterationError {
    /// A rule asked to accent a character outside the vowel tables.
    #[error("not a vowel: {0:?}")]
    InvalidVowel(char),
    #[error("input is not UTF-8 text: {0}")]
    InvalidInputType(#[from] Utf8Error),
    #[error("invalid value for {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
}
