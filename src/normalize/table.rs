//! Table-likeness heuristic.
//!
//! Columnar data extracted from PDFs shows up as many short fragments per
//! line, where prose is mostly long wrapped lines. The check must see the
//! original line breaks, so it runs before reflow.

/// Table flagger configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableFlaggerConfig {
    /// Lines with fewer stripped characters than this count as short
    pub short_line_chars: usize,
    /// A page is table-like when its short-line fraction exceeds this
    pub max_short_ratio: f64,
}

impl Default for TableFlaggerConfig {
    fn default() -> Self {
        Self {
            short_line_chars: 40,
            max_short_ratio: 0.6,
        }
    }
}

/// Flags pages dominated by short lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFlagger {
    config: TableFlaggerConfig,
}

impl TableFlagger {
    /// Create a flagger with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flagger with custom configuration.
    pub fn with_config(config: TableFlaggerConfig) -> Self {
        Self { config }
    }

    /// Fraction of non-blank lines that are short, or `None` without lines.
    pub fn short_line_ratio(&self, text: &str) -> Option<f64> {
        let (total, short) = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .fold((0usize, 0usize), |(total, short), line| {
                let is_short = line.chars().count() < self.config.short_line_chars;
                (total + 1, short + usize::from(is_short))
            });

        (total > 0).then(|| short as f64 / total as f64)
    }

    /// Whether the text looks like a table. Text without lines never does.
    pub fn is_table_like(&self, text: &str) -> bool {
        self.short_line_ratio(text)
            .is_some_and(|ratio| ratio > self.config.max_short_ratio)
    }
}
