use proptest::prelude::*;

use crate::rules::PIPELINE;
use crate::{epa, explain, transliterate, Options};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Spanish-looking lowercase text: letters, accented vowels, spaces and a
/// little punctuation.
fn arb_spanish() -> impl Strategy<Value = String> {
    "[a-zñáéíóú ,.]{0,40}"
}

fn arb_without_h() -> impl Strategy<Value = String> {
    "[a-gi-zA-GI-Zñáéíóú ,.¡!]{0,40}"
}

fn arb_protected_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|name| format!("@{name}")),
        "[a-z]{1,8}".prop_map(|tag| format!("#{tag}")),
    ]
}

fn escaping() -> Options {
    Options {
        escape_links: true,
        ..Options::default()
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_h_rule_ignores_text_without_h(text in arb_without_h()) {
        let h = PIPELINE[0];
        prop_assert_eq!(h.name(), "h");
        prop_assert_eq!(h.apply(&text, &Options::default()).unwrap(), text);
    }

    #[test]
    fn prop_uppercase_words_stay_uppercase(word in "[A-ZÁÉÍÓÚÑ]{1,12}") {
        let options = Options::default();
        let case_preserving = PIPELINE.iter().filter(|r| {
            matches!(r.name(), "h" | "gj" | "v" | "ll" | "word_ending" | "exception")
        });
        for rule in case_preserving {
            let out = rule.apply(&word, &options).unwrap();
            prop_assert_eq!(out.to_uppercase(), out.clone(), "{} lowered {:?}", rule.name(), word);
        }
    }

    #[test]
    fn prop_protected_only_text_is_unchanged(
        tokens in prop::collection::vec(arb_protected_token(), 1..6),
    ) {
        let text = tokens.join(" ");
        prop_assert_eq!(transliterate(&text, &escaping()).unwrap(), text);
    }

    #[test]
    fn prop_spanish_text_never_fails(text in arb_spanish()) {
        prop_assert!(epa(&text).is_ok(), "failed on {:?}", text);
    }

    #[test]
    fn prop_explain_agrees_with_transliterate(text in arb_spanish(), escape in any::<bool>()) {
        let options = Options { escape_links: escape, ..Options::default() };
        let explanation = explain(&text, &options).unwrap();
        prop_assert_eq!(explanation.output, transliterate(&text, &options).unwrap());
    }

    #[test]
    fn prop_plain_words_survive_among_links(word in "[a-z]{1,10}", tag in "[a-z]{1,8}") {
        let alone = epa(&word).unwrap();
        let text = format!("{word} #{tag}");
        let expected = format!("{alone} #{tag}");
        prop_assert_eq!(transliterate(&text, &escaping()).unwrap(), expected);
    }
}

#[test]
fn test_not_idempotent() {
    let once = epa("haber").unwrap();
    assert_eq!(once, "abêh");
    assert_eq!(epa(&once).unwrap(), "abê");
}
