//! Character-level classification for Spanish orthography.
//!
//! Vowel tables come in three parallel diacritic states (plain, acute,
//! circumflex), each in lower and upper case. The accent utilities map
//! between them by index.

use crate::error::TransliterationError;

const VOWELS_PLAIN: [char; 10] = ['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U'];
const VOWELS_ACUTE: [char; 10] = ['á', 'é', 'í', 'ó', 'ú', 'Á', 'É', 'Í', 'Ó', 'Ú'];
const VOWELS_CIRCUMFLEX: [char; 10] = ['â', 'ê', 'î', 'ô', 'û', 'Â', 'Ê', 'Î', 'Ô', 'Û'];

/// Word characters as the rule patterns see them: letters, digits and `_`.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub fn is_plain_vowel(c: char) -> bool {
    VOWELS_PLAIN.contains(&c)
}

/// Acute-accented vowel (`á`, `É`, ...). This is the "stressed" mark the
/// word-ending rules look for in a word's prefix.
pub fn is_acute_vowel(c: char) -> bool {
    VOWELS_ACUTE.contains(&c)
}

pub fn is_circumflex_vowel(c: char) -> bool {
    VOWELS_CIRCUMFLEX.contains(&c)
}

/// Plain or acute vowel, either case.
pub fn is_vowel(c: char) -> bool {
    is_plain_vowel(c) || is_acute_vowel(c)
}

/// Circumflexed counterpart of a vowel.
///
/// Plain vowels gain a circumflex; vowels that already carry an acute or a
/// circumflex are returned unchanged.
pub fn circumflex_of(vowel: char) -> Result<char, TransliterationError> {
    if let Some(i) = VOWELS_PLAIN.iter().position(|&v| v == vowel) {
        Ok(VOWELS_CIRCUMFLEX[i])
    } else if is_acute_vowel(vowel) || is_circumflex_vowel(vowel) {
        Ok(vowel)
    } else {
        Err(TransliterationError::InvalidVowel(vowel))
    }
}

/// Acute-accented counterpart of a vowel.
///
/// Plain vowels gain an acute; accented vowels are returned unchanged.
pub fn tilde_of(vowel: char) -> Result<char, TransliterationError> {
    if let Some(i) = VOWELS_PLAIN.iter().position(|&v| v == vowel) {
        Ok(VOWELS_ACUTE[i])
    } else if is_acute_vowel(vowel) || is_circumflex_vowel(vowel) {
        Ok(vowel)
    } else {
        Err(TransliterationError::InvalidVowel(vowel))
    }
}

/// Circumflexed vowel for both plain and acute input (`á` → `â`).
///
/// Used where an elided final consonant turns the vowel "open" regardless
/// of written stress.
pub(crate) fn open_vowel(vowel: char) -> Result<char, TransliterationError> {
    if let Some(i) = VOWELS_ACUTE.iter().position(|&v| v == vowel) {
        Ok(VOWELS_CIRCUMFLEX[i])
    } else {
        circumflex_of(vowel)
    }
}

/// Stressed form used by final `-d`: `a`/`e` take an acute, `i`/`o`/`u`
/// take a circumflex.
pub(crate) fn stressed_vowel(vowel: char) -> Result<char, TransliterationError> {
    match vowel.to_lowercase().next() {
        Some('a' | 'e' | 'á' | 'é') => tilde_of(vowel),
        _ => open_vowel(vowel),
    }
}

pub(crate) fn to_upper(c: char) -> String {
    c.to_uppercase().collect()
}

pub(crate) fn to_lower(c: char) -> String {
    c.to_lowercase().collect()
}

/// `c` re-cased to `reference`'s case: upper when `reference` is uppercase,
/// lower otherwise.
pub(crate) fn cased_like(c: char, reference: char) -> String {
    if reference.is_uppercase() {
        to_upper(c)
    } else {
        to_lower(c)
    }
}

/// A configured marker letter (VAF/VVF) for a source consonant: upper-cased
/// when `source` is uppercase, otherwise emitted as configured.
pub(crate) fn marker_for(marker: char, source: char) -> String {
    if source.is_uppercase() {
        to_upper(marker)
    } else {
        marker.to_string()
    }
}

/// Single-char lowercase fold for membership tests.
pub(crate) fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
