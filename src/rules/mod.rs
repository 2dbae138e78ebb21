//! The EPA rewrite rules and their fixed application order.
//!
//! Each rule is a whole-text pass. Later rules rely on the spelling left by
//! earlier ones (the digraph rule expects `v` → `b` and `ch` → `x` to have
//! run), so [`PIPELINE`] order is part of the transliteration.

mod ch;
mod digraph;
mod exceptions;
mod gj;
mod h;
mod interaction;
mod l;
mod ll;
mod psico;
pub(crate) mod scan;
mod v;
mod vaf;
mod word_ending;
mod x;

use crate::error::TransliterationError;
use crate::settings::Options;

/// A single rewrite pass over the whole text.
pub(crate) trait Rule: Sync {
    /// Stable identifier used in debug events and explanations.
    fn name(&self) -> &'static str;
    fn apply(&self, text: &str, options: &Options) -> Result<String, TransliterationError>;
}

pub(crate) static PIPELINE: [&dyn Rule; 13] = [
    &h::HRule,
    &x::XRule,
    &ch::ChRule,
    &gj::GjRule,
    &v::VRule,
    &ll::LlRule,
    &l::LRule,
    &psico::PsicoRule,
    &vaf::VafRule,
    &word_ending::WordEndingRule,
    &digraph::DigraphRule,
    &exceptions::ExceptionRule,
    &interaction::WordInteractionRule,
];

/// Names of the rules in application order.
pub fn rule_names() -> impl Iterator<Item = &'static str> {
    PIPELINE.iter().map(|rule| rule.name())
}
