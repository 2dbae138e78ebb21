//! Link escaping.
//!
//! URLs, `@mentions`, `#hashtags` and Roman numerals are swapped for numeric
//! placeholders before the rule pipeline runs and swapped back afterwards.
//!
//! Placeholder `i` is `1` followed by `i` in base 9 over the digits
//! `023456789`. No rule creates or deletes an ASCII digit (markers and the
//! lexicon carry none), so the sequence of digits in the text is the same
//! before and after the pipeline. Each placeholder is recorded by the index
//! of its first digit in that sequence and restored by position, never by
//! searching, so digits already in the input cannot be mistaken for one.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Match, Regex};
use tracing::{debug_span, warn};

use crate::rules::scan::compile;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?:[hH|][tT|][tT|][pP|][sS|]?://)?(?:www\.)?(?:[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-zA-Z|]{2,6})",
        r"|(?:@\w+\b)",
        r"|(?:#\w+\b)",
    ))
});
static ROMAN_WORD_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\b[MCDXLVI]{1,8}\b"));
static ROMAN_NUMERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^M{0,4}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3})")
});

const PLACEHOLDER_DIGITS: [char; 9] = ['0', '2', '3', '4', '5', '6', '7', '8', '9'];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Protected {
    /// Index of the placeholder's first digit among all ASCII digits of the
    /// escaped text.
    first_digit: usize,
    /// Digits in the placeholder.
    digits: usize,
    original: String,
}

/// Text with its protected spans replaced by placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Escaped {
    text: String,
    /// In text order.
    spans: Vec<Protected>,
}

impl Escaped {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn is_identity(&self) -> bool {
        self.spans.is_empty()
    }

    /// Put the original spans back into `transliterated`, walking its digits.
    pub(crate) fn restore(&self, transliterated: &str) -> String {
        let _span = debug_span!("unescape_links", spans = self.spans.len()).entered();
        let mut out = String::with_capacity(transliterated.len());
        let mut pending = self.spans.iter().peekable();
        let mut digit = 0;
        let mut skip = 0;
        for c in transliterated.chars() {
            if !c.is_ascii_digit() {
                out.push(c);
                continue;
            }
            if skip > 0 {
                skip -= 1;
            } else {
                match pending.next_if(|p| p.first_digit == digit) {
                    Some(protected) => {
                        out.push_str(&protected.original);
                        skip = protected.digits - 1;
                    }
                    None => out.push(c),
                }
            }
            digit += 1;
        }
        for protected in pending {
            warn!(
                original = %protected.original,
                first_digit = protected.first_digit,
                "placeholder not found, span left out"
            );
        }
        out
    }
}

/// Replace every protected span of `text` with a placeholder.
pub(crate) fn escape_links(text: &str) -> Escaped {
    let _span = debug_span!("escape_links", len = text.len()).entered();
    let ranges = protected_spans(text);

    let mut escaped = String::with_capacity(text.len());
    let mut spans = Vec::with_capacity(ranges.len());
    let mut digit = 0;
    let mut last = 0;
    for (i, range) in ranges.into_iter().enumerate() {
        let between = &text[last..range.start];
        digit += between.bytes().filter(u8::is_ascii_digit).count();
        escaped.push_str(between);

        let token = placeholder(i);
        spans.push(Protected {
            first_digit: digit,
            digits: token.len(),
            original: text[range.clone()].to_string(),
        });
        digit += token.len();
        escaped.push_str(&token);
        last = range.end;
    }
    escaped.push_str(&text[last..]);
    Escaped {
        text: escaped,
        spans,
    }
}

/// Byte ranges of protected spans, left to right, non-overlapping.
pub(crate) fn protected_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut link = LINK_RE.find_at(text, 0);
    let mut roman = ROMAN_WORD_RE.find_at(text, 0);
    let mut pos = 0;
    loop {
        // A pending match starting at or after `pos` is still the leftmost.
        if link.is_some_and(|m| m.start() < pos) {
            link = LINK_RE.find_at(text, pos);
        }
        if roman.is_some_and(|m| m.start() < pos) {
            roman = ROMAN_WORD_RE.find_at(text, pos);
        }
        let span = match (link, roman) {
            (Some(l), Some(r)) if r.start() < l.start() => roman_span(r),
            (Some(l), _) => l.range(),
            (None, Some(r)) => roman_span(r),
            (None, None) => break,
        };
        pos = span.end;
        spans.push(span);
    }
    spans
}

// Longest valid numeral at the head of a Roman-letter word (`DIM` → `DI`).
fn roman_span(word: Match<'_>) -> Range<usize> {
    let len = ROMAN_NUMERAL_RE
        .find(word.as_str())
        .map_or(0, |m| m.end())
        .max(1);
    word.start()..word.start() + len
}

fn placeholder(index: usize) -> String {
    let mut digits = Vec::new();
    let mut n = index;
    loop {
        digits.push(PLACEHOLDER_DIGITS[n % 9]);
        n /= 9;
        if n == 0 {
            break;
        }
    }
    let mut out = String::with_capacity(digits.len() + 1);
    out.push('1');
    out.extend(digits.iter().rev());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<&str> {
        protected_spans(text)
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn test_detects_links_mentions_hashtags() {
        let text = "Oye sexy @miguel, la web HTTPS://andaluh.es no sale en google.es pero si en www.andaluh.es y en https://www.andaluh.es #porqueseñor";
        assert_eq!(
            spans(text),
            [
                "@miguel",
                "HTTPS://andaluh.es",
                "google.es",
                "www.andaluh.es",
                "https://www.andaluh.es",
                "#porqueseñor",
            ]
        );
    }

    #[test]
    fn test_detects_roman_numerals() {
        assert_eq!(spans("Felipe II y el siglo XXI"), ["II", "XXI"]);
        assert_eq!(spans("DIM"), ["DI"]);
        assert_eq!(spans("Mi VIDA"), Vec::<&str>::new());
    }

    #[test]
    fn test_placeholder_format() {
        assert_eq!(placeholder(0), "10");
        assert_eq!(placeholder(1), "12");
        assert_eq!(placeholder(8), "19");
        assert_eq!(placeholder(9), "120");
        assert_eq!(placeholder(80), "199");
        assert_eq!(placeholder(81), "1200");
    }

    #[test]
    fn test_placeholders_among_input_digits() {
        let text = "1 11 @a 111 10 #b 12";
        let escaped = escape_links(text);
        assert_eq!(escaped.text(), "1 11 10 111 10 12 12");
        assert_eq!(escaped.restore(escaped.text()), text);
    }

    #[test]
    fn test_escaped_length_stays_proportional() {
        let n = 4000;
        let text = format!("{}{}", "1 ".repeat(n), "@a ".repeat(n));
        let escaped = escape_links(&text);
        // Placeholder for index < 9^4 is at most five digits.
        assert!(escaped.text().len() <= 2 * n + 6 * n);
        assert_eq!(escaped.restore(escaped.text()), text);
    }

    #[test]
    fn test_restore_after_text_around_digits_changes() {
        let escaped = escape_links("casas 2 @pepe 33 #x");
        assert_eq!(escaped.text(), "casas 2 10 33 12");
        assert_eq!(escaped.restore("caçâ 2 10 33 12"), "caçâ 2 @pepe 33 #x");
    }

    #[test]
    fn test_many_roman_words() {
        let text = "I ".repeat(20_000);
        assert_eq!(protected_spans(&text).len(), 20_000);
        let mixed = format!("{}@a", "XI ".repeat(500));
        let found = spans(&mixed);
        assert_eq!(found.len(), 501);
        assert_eq!(found.last(), Some(&"@a"));
    }

    #[test]
    fn test_escape_restore() {
        let text = "ver @andaluh y #EPA en andaluh.es";
        let escaped = escape_links(text);
        assert!(!escaped.text().contains('@'));
        assert!(!escaped.text().contains("andaluh.es"));
        assert_eq!(escaped.restore(escaped.text()), text);
    }

    #[test]
    fn test_adjacent_and_digit_neighbours() {
        let text = "1@a#b2";
        let escaped = escape_links(text);
        assert_eq!(escaped.restore(escaped.text()), text);
    }

    #[test]
    fn test_no_spans_is_identity() {
        let escaped = escape_links("nada que proteger");
        assert!(escaped.is_identity());
        assert_eq!(escaped.text(), "nada que proteger");
    }

    #[test]
    fn test_missing_placeholder_is_skipped() {
        let escaped = escape_links("hola @pepe adiós");
        assert_eq!(escaped.restore("ola adiô"), "ola adiô");
    }
}
