//! Normalization report.

use serde::{Deserialize, Serialize};

/// What a normalization run changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizeReport {
    /// Number of pages in the input document
    pub page_count: usize,

    /// Lines classified as running headers/footers, sorted
    pub boilerplate_lines: Vec<String>,

    /// Numbers of pages flagged as table-like, in page order
    pub table_like_pages: Vec<u32>,

    /// Number of pages removed because they were table-like
    pub dropped_pages: usize,

    /// Characters in the input document's full text
    pub char_count_before: usize,

    /// Characters in the output document's full text
    pub char_count_after: usize,
}

impl NormalizeReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters removed by normalization.
    pub fn chars_removed(&self) -> usize {
        self.char_count_before.saturating_sub(self.char_count_after)
    }

    /// Whether any boilerplate line was found.
    pub fn has_boilerplate(&self) -> bool {
        !self.boilerplate_lines.is_empty()
    }
}
