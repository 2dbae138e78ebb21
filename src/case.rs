//! Case preservation for exception replacements.
//!
//! Replacements are stored lowercase. The source word's case pattern decides
//! how the replacement is re-cased; irregular patterns (`hOz`, `McDonald`)
//! are not reproduced character by character and fall back to lowercase.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePattern {
    Lower,
    Upper,
    Title,
    Irregular,
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}

/// Classify `word`. A word without any cased character is `Irregular`.
pub fn case_pattern(word: &str) -> CasePattern {
    let has_cased = word.chars().any(is_cased);
    if !has_cased {
        return CasePattern::Irregular;
    }
    if !word.chars().any(char::is_uppercase) {
        return CasePattern::Lower;
    }
    if !word.chars().any(char::is_lowercase) {
        return CasePattern::Upper;
    }
    if is_title(word) {
        CasePattern::Title
    } else {
        CasePattern::Irregular
    }
}

// Uppercase only after uncased chars, lowercase only after cased ones.
fn is_title(word: &str) -> bool {
    let mut previous_is_cased = false;
    for c in word.chars() {
        if c.is_uppercase() {
            if previous_is_cased {
                return false;
            }
            previous_is_cased = true;
        } else if c.is_lowercase() {
            if !previous_is_cased {
                return false;
            }
            previous_is_cased = true;
        } else {
            previous_is_cased = false;
        }
    }
    true
}

/// Title-case every run of cased letters: first upper, the rest lower.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_is_cased = false;
    for c in s.chars() {
        if previous_is_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_cased = is_cased(c);
    }
    out
}

/// Re-case `replacement_lower` after the case pattern of `word`.
pub fn keep_case(word: &str, replacement_lower: &str) -> String {
    match case_pattern(word) {
        CasePattern::Lower | CasePattern::Irregular => replacement_lower.to_string(),
        CasePattern::Upper => replacement_lower.to_uppercase(),
        CasePattern::Title => title_case(replacement_lower),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_pattern() {
        assert_eq!(case_pattern("haz"), CasePattern::Lower);
        assert_eq!(case_pattern("HAZ"), CasePattern::Upper);
        assert_eq!(case_pattern("Haz"), CasePattern::Title);
        assert_eq!(case_pattern("hAz"), CasePattern::Irregular);
        assert_eq!(case_pattern("McDonald"), CasePattern::Irregular);
        assert_eq!(case_pattern("123"), CasePattern::Irregular);
        assert_eq!(case_pattern("Dos2"), CasePattern::Title);
        assert_eq!(case_pattern("B2b"), CasePattern::Irregular);
    }

    #[test]
    fn test_keep_case() {
        assert_eq!(keep_case("haz", "âh"), "âh");
        assert_eq!(keep_case("HAZ", "âh"), "ÂH");
        assert_eq!(keep_case("Haz", "âh"), "Âh");
        assert_eq!(keep_case("hAZ", "âh"), "âh");
        assert_eq!(keep_case("Todo", "tó"), "Tó");
        assert_eq!(keep_case("NV", "mb"), "MB");
        assert_eq!(keep_case("nV", "mb"), "mb");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("êppray"), "Êppray");
        assert_eq!(title_case("trâl-lado"), "Trâl-Lado");
        assert_eq!(title_case(""), "");
    }
}
