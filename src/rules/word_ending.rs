//! Word-final rules: intervocalic `-d-` in participles, `-eps`, final `-d`,
//! final `-s` and the remaining final consonants.
//!
//! Each ending is a separate pass over the words of the text, in that order.
//! "Stressed prefix" means the part of the word before the ending already
//! carries an acute accent.

use super::scan::map_words;
use super::Rule;
use crate::case::keep_case;
use crate::error::TransliterationError;
use crate::lexicon::{ExceptionTable, Lexicon};
use crate::settings::Options;
use crate::unicode::{
    circumflex_of, fold, is_acute_vowel, is_vowel, open_vowel, stressed_vowel, tilde_of,
};

pub(crate) struct WordEndingRule;

impl Rule for WordEndingRule {
    fn name(&self) -> &'static str {
        "word_ending"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let lexicon = Lexicon::global();
        let text = map_words(text, |w| intervocalic_d(lexicon, w))?;
        let text = map_words(&text, |w| Ok(eps_ending(w)))?;
        let text = map_words(&text, |w| final_d(lexicon, w))?;
        let text = map_words(&text, |w| final_s(lexicon, w))?;
        map_words(&text, |w| final_consonant(lexicon, w))
    }
}

/// A word split as prefix + vowel + final consonant.
struct Ending<'a> {
    word: &'a str,
    prefix: String,
    vowel: char,
    consonant: char,
}

impl<'a> Ending<'a> {
    /// `None` unless the word ends in a vowel (plain or acute) followed by a
    /// consonant accepted by `is_final`, with at least one char before them.
    fn split(word: &'a str, is_final: impl Fn(char) -> bool) -> Option<Self> {
        let mut chars = word.chars().rev();
        let consonant = chars.next().filter(|&c| is_final(c))?;
        let vowel = chars.next().filter(|&c| is_vowel(c))?;
        let prefix: String = chars.rev().collect();
        if prefix.is_empty() {
            return None;
        }
        Some(Ending {
            word,
            prefix,
            vowel,
            consonant,
        })
    }

    fn stressed_prefix(&self) -> bool {
        has_acute(&self.prefix)
    }

    fn exception(&self, lexicon: &Lexicon, table: ExceptionTable) -> Option<String> {
        lexicon
            .lookup(table, self.word)
            .map(|replacement| keep_case(self.word, replacement))
    }
}

fn has_acute(s: &str) -> bool {
    s.chars().any(is_acute_vowel)
}

fn aspirate(consonant: char) -> char {
    if consonant.is_uppercase() {
        'H'
    } else {
        'h'
    }
}

// -ado, -ada, -ido, -ído (+ optional -s).
fn intervocalic_d(lexicon: &Lexicon, word: &str) -> Result<Option<String>, TransliterationError> {
    let chars: Vec<char> = word.chars().collect();
    let core_len = match chars.last() {
        Some('s' | 'S') => chars.len() - 1,
        _ => chars.len(),
    };
    if core_len < 3 {
        return Ok(None);
    }
    let (a, d, b) = (chars[core_len - 3], chars[core_len - 2], chars[core_len - 1]);
    if !matches!(a, 'a' | 'A' | 'i' | 'I' | 'í' | 'Í')
        || !matches!(d, 'd' | 'D')
        || !matches!(b, 'o' | 'O' | 'a' | 'A')
    {
        return Ok(None);
    }

    if let Some(replacement) = lexicon.lookup(ExceptionTable::WordEndIntervocalicD, word) {
        return Ok(Some(keep_case(word, replacement)));
    }
    let prefix: String = chars[..core_len - 3].iter().collect();
    if has_acute(&prefix) {
        return Ok(None);
    }

    let suffix: String = chars[core_len - 3..].iter().collect();
    let contracted = match suffix.to_lowercase().as_str() {
        "ada" => {
            let a_acute = if b.is_uppercase() { 'Á' } else { 'á' };
            format!("{prefix}{a_acute}")
        }
        "adas" => {
            let head: String = [a, d].iter().collect();
            let aspirated = format!("{}h", circumflex_of(a)?);
            format!("{prefix}{}", keep_case(&head, &aspirated))
        }
        "ado" => format!("{prefix}{a}{b}"),
        "ados" | "idos" | "ídos" => format!("{prefix}{}{}", tilde_of(a)?, circumflex_of(b)?),
        "ido" | "ído" => {
            let i_acute = if a.is_uppercase() { 'Í' } else { 'í' };
            format!("{prefix}{i_acute}{b}")
        }
        _ => return Ok(None),
    };
    Ok(Some(contracted))
}

// -eps after a stressed prefix collapses to ê (`bíceps` → `bícê`).
fn eps_ending(word: &str) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 4 {
        return None;
    }
    let n = chars.len();
    let e = chars[n - 3];
    if fold(e) != 'e' || fold(chars[n - 2]) != 'p' || fold(chars[n - 1]) != 's' {
        return None;
    }
    let prefix: String = chars[..n - 3].iter().collect();
    if !has_acute(&prefix) {
        return None;
    }
    let e_open = if e.is_uppercase() { 'Ê' } else { 'ê' };
    Some(format!("{prefix}{e_open}"))
}

fn final_d(lexicon: &Lexicon, word: &str) -> Result<Option<String>, TransliterationError> {
    let Some(ending) = Ending::split(word, |c| matches!(c, 'd' | 'D')) else {
        return Ok(None);
    };
    if let Some(replacement) = ending.exception(lexicon, ExceptionTable::WordEndD) {
        return Ok(Some(replacement));
    }
    let prefix = &ending.prefix;
    let out = if ending.stressed_prefix() {
        format!("{prefix}{}", open_vowel(ending.vowel)?)
    } else if matches!(fold(ending.vowel), 'a' | 'e' | 'á' | 'é') {
        format!("{prefix}{}", stressed_vowel(ending.vowel)?)
    } else {
        format!(
            "{prefix}{}{}",
            stressed_vowel(ending.vowel)?,
            aspirate(ending.consonant)
        )
    };
    Ok(Some(out))
}

fn final_s(lexicon: &Lexicon, word: &str) -> Result<Option<String>, TransliterationError> {
    let Some(ending) = Ending::split(word, |c| matches!(c, 's' | 'S')) else {
        return Ok(None);
    };
    if let Some(replacement) = ending.exception(lexicon, ExceptionTable::WordEndS) {
        return Ok(Some(replacement));
    }
    let prefix = &ending.prefix;
    let open = open_vowel(ending.vowel)?;
    let out = if is_acute_vowel(ending.vowel) {
        format!("{prefix}{open}{}", aspirate(ending.consonant))
    } else {
        format!("{prefix}{open}")
    };
    Ok(Some(out))
}

fn final_consonant(lexicon: &Lexicon, word: &str) -> Result<Option<String>, TransliterationError> {
    let is_final = |c: char| c.is_ascii() && "bcfgjklprtxz".contains(c.to_ascii_lowercase());
    let Some(ending) = Ending::split(word, is_final) else {
        return Ok(None);
    };
    if let Some(replacement) = ending.exception(lexicon, ExceptionTable::WordEndConsonant) {
        return Ok(Some(replacement));
    }
    let prefix = &ending.prefix;
    let open = open_vowel(ending.vowel)?;
    let out = if ending.stressed_prefix() {
        format!("{prefix}{open}")
    } else {
        format!("{prefix}{open}{}", aspirate(ending.consonant))
    };
    Ok(Some(out))
}
