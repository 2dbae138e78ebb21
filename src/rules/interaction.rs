use super::Rule;
use crate::error::TransliterationError;
use crate::settings::Options;
use crate::unicode::{fold, is_word_char};

/// Cross-word liaison: a word-final `l` followed by one whitespace char and a
/// consonant other than `r` rotates to `r` (`el barco` → `er barco`).
///
/// The consonant that triggers a rotation belongs to the match, so the word
/// it starts cannot trigger one itself.
pub(crate) struct WordInteractionRule;

impl Rule for WordInteractionRule {
    fn name(&self) -> &'static str {
        "word_interaction"
    }

    fn apply(&self, text: &str, _options: &Options) -> Result<String, TransliterationError> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = chars.clone();
        let mut resume = 0;
        let mut i = 0;
        while i < chars.len() {
            if !is_word_char(chars[i]) {
                i += 1;
                continue;
            }
            let start = i;
            while i < chars.len() && is_word_char(chars[i]) {
                i += 1;
            }
            let end = i;
            if start < resume {
                continue;
            }
            let last = chars[end - 1];
            let spaced = chars.get(end).is_some_and(|c| c.is_whitespace());
            let consonant_follows = chars.get(end + 1).is_some_and(|&c| is_liaison_consonant(c));
            if matches!(last, 'l' | 'L') && spaced && consonant_follows {
                out[end - 1] = if last == 'L' { 'R' } else { 'r' };
                resume = end + 2;
            }
        }
        Ok(out.into_iter().collect())
    }
}

fn is_liaison_consonant(c: char) -> bool {
    matches!(
        fold(c),
        'b' | 'c'
            | 'ç'
            | 'd'
            | 'f'
            | 'g'
            | 'h'
            | 'j'
            | 'k'
            | 'l'
            | 'm'
            | 'n'
            | 'ñ'
            | 'p'
            | 'q'
            | 's'
            | 't'
            | 'v'
            | 'w'
            | 'x'
            | 'y'
            | 'z'
    )
}
