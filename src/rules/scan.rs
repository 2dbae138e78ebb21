//! Matching helpers shared by the rewrite rules.
//!
//! The rules work on whole words (maximal runs of [`is_word_char`]) or on
//! regex matches over the whole text. The `regex` crate has no look-around,
//! so "not preceded by" constraints are checked against the text before each
//! match instead.

use regex::{Captures, Regex};

use crate::error::TransliterationError;
use crate::unicode::is_word_char;

/// Compile a built-in rule pattern.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in rule pattern must compile")
}

/// Like [`Regex::replace_all`], but the replacement may fail.
pub(crate) fn try_replace_all<F>(
    re: &Regex,
    text: &str,
    mut replace: F,
) -> Result<String, TransliterationError>
where
    F: FnMut(&Captures<'_>) -> Result<String, TransliterationError>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let m = caps.get(0).expect("group 0 is always present");
        out.push_str(&text[last..m.start()]);
        out.push_str(&replace(&caps)?);
        last = m.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

/// Replace every match of `re` except those whose preceding character is in
/// `forbidden`; those are copied through unchanged.
pub(crate) fn replace_unless_preceded<F>(
    re: &Regex,
    text: &str,
    forbidden: &[char],
    mut replace: F,
) -> String
where
    F: FnMut(&Captures<'_>) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let m = caps.get(0).expect("group 0 is always present");
        out.push_str(&text[last..m.start()]);
        match preceding_char(text, m.start()) {
            Some(c) if forbidden.contains(&c) => out.push_str(m.as_str()),
            _ => out.push_str(&replace(&caps)),
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// First char of a capture group; groups here are never empty.
pub(crate) fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or_default()
}

/// The character ending right before byte offset `at`.
pub(crate) fn preceding_char(text: &str, at: usize) -> Option<char> {
    text[..at].chars().next_back()
}

/// Rewrite every word of `text`. `f` returns `None` to keep a word as is.
/// Non-word characters are copied through.
pub(crate) fn map_words<F>(text: &str, mut f: F) -> Result<String, TransliterationError>
where
    F: FnMut(&str) -> Result<Option<String>, TransliterationError>,
{
    let mut out = String::with_capacity(text.len());
    let mut word_start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        match (is_word_char(c), word_start) {
            (true, None) => word_start = Some(i),
            (false, Some(start)) => {
                push_word(&mut out, &text[start..i], &mut f)?;
                word_start = None;
                out.push(c);
            }
            (false, None) => out.push(c),
            (true, Some(_)) => {}
        }
    }
    if let Some(start) = word_start {
        push_word(&mut out, &text[start..], &mut f)?;
    }
    Ok(out)
}

fn push_word<F>(out: &mut String, word: &str, f: &mut F) -> Result<(), TransliterationError>
where
    F: FnMut(&str) -> Result<Option<String>, TransliterationError>,
{
    match f(word)? {
        Some(replacement) => out.push_str(&replacement),
        None => out.push_str(word),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_words_keeps_separators() {
        let out = map_words("¡hola, mundo_1!  ", |w| Ok(Some(w.to_uppercase()))).unwrap();
        assert_eq!(out, "¡HOLA, MUNDO_1!  ");
    }

    #[test]
    fn test_map_words_none_keeps_word() {
        let out = map_words("uno dos", |w| Ok((w == "dos").then(|| "2".to_string()))).unwrap();
        assert_eq!(out, "uno 2");
    }

    #[test]
    fn test_map_words_propagates_error() {
        let err = map_words("a b", |_| Err(TransliterationError::InvalidVowel('b'))).unwrap_err();
        assert!(matches!(err, TransliterationError::InvalidVowel('b')));
    }

    #[test]
    fn test_replace_unless_preceded() {
        let re = compile("(?i)hu");
        let out = replace_unless_preceded(&re, "hu chu Chu", &['c', 'C'], |_| "gu".into());
        assert_eq!(out, "gu chu Chu");
    }

    #[test]
    fn test_try_replace_all() {
        let re = compile("[0-9]");
        let out = try_replace_all(&re, "a1b2", |c| Ok(format!("<{}>", &c[0]))).unwrap();
        assert_eq!(out, "a<1>b<2>");
    }
}
