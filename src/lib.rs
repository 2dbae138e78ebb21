//! Castilian Spanish → Andalusian EPA transliteration.
//!
//! The transliteration is an ordered pipeline of 13 rewrite rules backed by
//! exception dictionaries and a case-preservation policy, optionally wrapped
//! in a link escaper that shields URLs, mentions, hashtags and Roman
//! numerals.
//!
//! ```
//! assert_eq!(andaluh::epa("Venid todos").unwrap(), "Benîh tôh");
//! ```

pub mod case;
pub mod error;
mod escape;
pub mod lexicon;
mod pipeline;
mod rules;
pub mod settings;
pub mod trace_init;
pub mod unicode;

#[cfg(test)]
mod tests;

pub use error::TransliterationError;
pub use pipeline::{epa, explain, format_text, transliterate, transliterate_bytes, Explanation, RuleStep};
pub use rules::rule_names;
pub use settings::{Options, Settings, SettingsError};
