//! Running header and footer detection.
//!
//! Lines that recur verbatim at the top or bottom of a large enough share of
//! pages are treated as boilerplate. Detection looks at every page before any
//! page is edited.

use std::collections::{HashMap, HashSet};

use crate::model::Page;

/// Detects lines repeated across page edges.
#[derive(Debug, Clone, Copy)]
pub struct BoilerplateDetector {
    top_n: usize,
    bottom_n: usize,
    threshold: f64,
}

impl BoilerplateDetector {
    /// Create a detector.
    ///
    /// `threshold` is the fraction of pages (in `(0, 1]`) a line must
    /// appear on, counting each candidate occurrence.
    pub fn new(top_n: usize, bottom_n: usize, threshold: f64) -> Self {
        Self {
            top_n,
            bottom_n,
            threshold,
        }
    }

    /// Count how often each candidate line appears across all pages.
    ///
    /// A page with fewer than `top_n + bottom_n` non-blank lines contributes
    /// the same line twice when the top and bottom windows overlap.
    pub fn candidate_counts(&self, pages: &[Page]) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = HashMap::new();

        for page in pages {
            let lines: Vec<&str> = page
                .text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();

            let top = lines.iter().take(self.top_n);
            let bottom = lines[lines.len().saturating_sub(self.bottom_n)..].iter();
            for line in top.chain(bottom) {
                *counts.entry((*line).to_string()).or_default() += 1;
            }
        }

        counts
    }

    /// Find the lines to remove.
    pub fn detect(&self, pages: &[Page]) -> HashSet<String> {
        let total_pages = pages.len().max(1) as f64;

        self.candidate_counts(pages)
            .into_iter()
            .filter(|(_, count)| *count as f64 / total_pages >= self.threshold)
            .map(|(line, _)| line)
            .collect()
    }
}

/// Drop lines whose stripped form exactly matches a boilerplate line.
///
/// Remaining lines keep their original spacing; the result is stripped.
pub fn remove_lines(text: &str, boilerplate: &HashSet<String>) -> String {
    text.lines()
        .filter(|line| !boilerplate.contains(line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
