//! Paragraph reflow.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::PAGE_SEPARATOR;

fn paragraph_break_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

/// Turns hard-wrapped paragraphs into single lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reflower;

impl Reflower {
    /// Create a new reflower.
    pub fn new() -> Self {
        Self
    }

    /// Reflow a page's text. See [`reflow`].
    pub fn reflow(&self, text: &str) -> String {
        reflow(text)
    }
}

/// Collapse each paragraph onto one line, keeping paragraph breaks.
///
/// Paragraphs are separated by blank lines; a line holding only whitespace
/// counts as blank. Within a paragraph, all runs of whitespace (line breaks
/// included) become a single space. Empty paragraphs disappear. Reflowing reflowed text changes nothing.
pub fn reflow(text: &str) -> String {
    paragraph_break_regex()
        .split(text)
        .map(|para| para.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|para| !para.is_empty())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflow_joins_wrapped_lines() {
        let text = "The quick brown\nfox jumps over\nthe lazy dog.";
        assert_eq!(reflow(text), "The quick brown fox jumps over the lazy dog.");
    }

    #[test]
    fn test_reflow_keeps_paragraph_breaks() {
        let text = "First para\nline two.\n\n\nSecond   para\n  here.";
        assert_eq!(reflow(text), "First para line two.\n\nSecond para here.");
    }

    #[test]
    fn test_whitespace_only_line_breaks_paragraph() {
        assert_eq!(reflow("one\n \t \ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_reflow_idempotent() {
        let samples = [
            "a\nb\n\nc\n d \n\n\n e",
            "  leading\n\n\ntrailing  \n",
            "single",
            "",
            "\n\n\n",
            "tabs\tand\u{2003}wide spaces\n\nok",
        ];
        for text in samples {
            let once = reflow(text);
            assert_eq!(reflow(&once), once, "not idempotent for {:?}", text);
        }
    }

    #[test]
    fn test_reflow_empty() {
        assert_eq!(reflow(""), "");
        assert_eq!(reflow("   \n\n  "), "");
    }
}
