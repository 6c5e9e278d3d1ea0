//! Character-level text cleanup.

use std::sync::OnceLock;

use regex::Regex;

/// Space-like characters replaced with an ordinary space.
const SPACE_VARIANTS: [char; 3] = [
    '\u{00A0}', // no-break space
    '\u{2009}', // thin space
    '\u{2002}', // en space
];

/// Soft hyphen, deleted outright.
const SOFT_HYPHEN: char = '\u{00AD}';

fn hyphenation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w+)-\n(\w+)").unwrap())
}

/// Whitespace and hyphenation cleanup for a page's text.
///
/// Whitespace normalization runs first: a soft hyphen sitting next to a
/// real line-break hyphen would otherwise stop the hyphenation repair from
/// matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner;

impl TextCleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self
    }

    /// Apply both passes.
    pub fn clean(&self, text: &str) -> String {
        fix_hyphenation(&normalize_whitespace(text))
    }
}

/// Replace space variants with a plain space and delete soft hyphens.
pub fn normalize_whitespace(text: &str) -> String {
    text.chars()
        .filter(|&c| c != SOFT_HYPHEN)
        .map(|c| if SPACE_VARIANTS.contains(&c) { ' ' } else { c })
        .collect()
}

/// Join words broken by a hyphen at the end of a line.
///
/// Only a hyphen immediately followed by a line break is repaired, so
/// compounds like `long-term` are preserved.
pub fn fix_hyphenation(text: &str) -> String {
    hyphenation_regex().replace_all(text, "$1$2").into_owned()
}
