//! Public entry points: run the 13 rules in order, optionally inside the
//! link-escaping wrapper, and the per-rule [`explain`] trace.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::error::TransliterationError;
use crate::escape::escape_links;
use crate::rules::PIPELINE;
use crate::settings::Options;

/// Transliterate Castilian spelling into EPA.
///
/// Empty input returns an empty string without running any rule. With
/// `options.debug` every intermediate text is emitted as a DEBUG event.
pub fn transliterate(text: &str, options: &Options) -> Result<String, TransliterationError> {
    options.validate()?;
    if text.is_empty() {
        return Ok(String::new());
    }
    let _span = debug_span!(
        "transliterate",
        len = text.len(),
        escape_links = options.escape_links
    )
    .entered();

    if !options.escape_links {
        return run_rules(text, options, |_, _| {});
    }
    let escaped = escape_links(text);
    if escaped.is_identity() {
        return run_rules(text, options, |_, _| {});
    }
    if options.debug {
        debug!(text = escaped.text(), "links escaped");
    }
    let transliterated = run_rules(escaped.text(), options, |_, _| {})?;
    let restored = escaped.restore(&transliterated);
    if options.debug {
        debug!(text = %restored, "links restored");
    }
    Ok(restored)
}

/// [`transliterate`] for raw input; bytes that are not UTF-8 are rejected
/// before any rule runs.
pub fn transliterate_bytes(bytes: &[u8], options: &Options) -> Result<String, TransliterationError> {
    let text = std::str::from_utf8(bytes)?;
    transliterate(text, options)
}

/// [`transliterate`] with default options (`ç`, `h`, no escaping).
pub fn epa(text: &str) -> Result<String, TransliterationError> {
    transliterate(text, &Options::default())
}

fn run_rules(
    text: &str,
    options: &Options,
    mut on_step: impl FnMut(&'static str, &str),
) -> Result<String, TransliterationError> {
    let mut text = text.to_string();
    for rule in PIPELINE.iter() {
        text = rule.apply(&text, options)?;
        if options.debug {
            debug!(rule = rule.name(), text = %text, "rule applied");
        }
        on_step(rule.name(), &text);
    }
    Ok(text)
}

/// Text after one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleStep {
    pub rule: &'static str,
    pub output: String,
    /// Whether this rule changed its input.
    pub changed: bool,
}

/// Per-rule trace of one transliteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub input: String,
    /// Input with protected spans replaced by placeholders, when escaping
    /// found any.
    pub escaped: Option<String>,
    pub steps: Vec<RuleStep>,
    pub output: String,
}

/// Run the pipeline and record the text after every rule.
pub fn explain(text: &str, options: &Options) -> Result<Explanation, TransliterationError> {
    options.validate()?;
    if text.is_empty() {
        return Ok(Explanation {
            input: String::new(),
            escaped: None,
            steps: Vec::new(),
            output: String::new(),
        });
    }

    let escaped = options
        .escape_links
        .then(|| escape_links(text))
        .filter(|e| !e.is_identity());
    let working = escaped.as_ref().map_or(text, |e| e.text());

    let mut steps = Vec::with_capacity(PIPELINE.len());
    let mut previous = working.to_string();
    let transliterated = run_rules(working, options, |rule, output| {
        steps.push(RuleStep {
            rule,
            output: output.to_string(),
            changed: output != previous,
        });
        previous = output.to_string();
    })?;

    let output = match &escaped {
        Some(e) => e.restore(&transliterated),
        None => transliterated,
    };
    Ok(Explanation {
        input: text.to_string(),
        escaped: escaped.map(|e| e.text().to_string()),
        steps,
        output,
    })
}

/// Format an [`Explanation`] as human-readable text.
///
/// Changed steps are marked with `*` and a caret under the first character
/// that differs from the previous text.
pub fn format_text(explanation: &Explanation) -> String {
    const LABEL_WIDTH: usize = 18;
    let mut out = String::new();

    out.push_str(&format!(
        "=== EPA for \"{}\" ({} rules) ===\n",
        explanation.input,
        explanation.steps.len(),
    ));
    let mut previous = explanation.input.as_str();
    if let Some(escaped) = &explanation.escaped {
        out.push_str(&format!("  {:<LABEL_WIDTH$}{}\n", "(escaped)", escaped));
        previous = escaped;
    }

    for step in &explanation.steps {
        let mark = if step.changed { '*' } else { ' ' };
        out.push_str(&format!(
            "{mark} {:<LABEL_WIDTH$}{}\n",
            step.rule, step.output
        ));
        if step.changed {
            let column = first_difference_column(previous, &step.output);
            out.push_str(&format!("{}^\n", " ".repeat(2 + LABEL_WIDTH + column)));
        }
        previous = &step.output;
    }

    out.push_str(&format!("\n=== Output ===\n  {}\n", explanation.output));
    out
}

// Display column of the first char where `after` departs from `before`.
fn first_difference_column(before: &str, after: &str) -> usize {
    use unicode_width::UnicodeWidthStr;

    let common: usize = before
        .chars()
        .zip(after.chars())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a.len_utf8())
        .sum();
    UnicodeWidthStr::width(&after[..common])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(epa("").unwrap(), "");
        let e = explain("", &Options::default()).unwrap();
        assert!(e.steps.is_empty());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = Options {
            vaf: '3',
            ..Options::default()
        };
        let err = transliterate("hola", &options).unwrap_err();
        assert!(matches!(
            err,
            TransliterationError::InvalidOption { field: "vaf", .. }
        ));
    }

    #[test]
    fn test_bytes_gate() {
        let options = Options::default();
        assert_eq!(transliterate_bytes("haber".as_bytes(), &options).unwrap(), "abêh");
        let err = transliterate_bytes(&[0x68, 0xff, 0x61], &options).unwrap_err();
        assert!(matches!(err, TransliterationError::InvalidInputType(_)));
    }

    #[test]
    fn test_debug_does_not_change_output() {
        let text = "Venid todos a la fiesta";
        let options = Options {
            debug: true,
            ..Options::default()
        };
        assert_eq!(transliterate(text, &options).unwrap(), epa(text).unwrap());
    }

    #[test]
    fn test_custom_markers() {
        let options = Options {
            vaf: 's',
            vvf: 'j',
            ..Options::default()
        };
        assert_eq!(transliterate("Xilófono gente", &options).unwrap(), "Silófono jente");
    }

    #[test]
    fn test_explain_matches_transliterate() {
        let text = "Todo Xenomorfo dice: [haber]";
        let options = Options::default();
        let e = explain(text, &options).unwrap();
        assert_eq!(e.steps.len(), 13);
        assert_eq!(e.output, transliterate(text, &options).unwrap());
        assert_eq!(e.steps.last().unwrap().output, e.output);
        let h = &e.steps[0];
        assert_eq!(h.rule, "h");
        assert!(h.changed);
        assert_eq!(h.output, "Todo Xenomorfo dice: [aber]");
        assert!(!e.steps[2].changed, "no ch in the text");
    }

    #[test]
    fn test_explain_with_escaping() {
        let options = Options {
            escape_links: true,
            ..Options::default()
        };
        let e = explain("sexy @miguel", &options).unwrap();
        let escaped = e.escaped.as_deref().unwrap();
        assert!(!escaped.contains('@'));
        assert_eq!(e.output, "çêççy @miguel");

        let plain = explain("sin enlaces", &options).unwrap();
        assert_eq!(plain.escaped, None);
    }

    #[test]
    fn test_explanation_serializes() {
        let e = explain("haber", &Options::default()).unwrap();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["output"], "abêh");
        assert_eq!(json["steps"][0]["rule"], "h");
        assert_eq!(json["steps"][0]["changed"], true);
    }

    #[test]
    fn test_format_text() {
        let e = explain("haber", &Options::default()).unwrap();
        let text = format_text(&e);
        assert!(text.starts_with("=== EPA for \"haber\" (13 rules) ==="));
        assert!(text.contains("* h"));
        assert!(text.contains("  digraph"));
        assert!(text.ends_with("=== Output ===\n  abêh\n"));
    }

    #[test]
    fn test_first_difference_column() {
        assert_eq!(first_difference_column("haber", "aber"), 0);
        assert_eq!(first_difference_column("aber", "abêh"), 2);
        assert_eq!(first_difference_column("éxito", "éççito"), 1);
    }
}
