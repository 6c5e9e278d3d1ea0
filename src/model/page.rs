//! Page-level types.

use serde::{Deserialize, Serialize};

/// A single provenance-tagged page of text.
///
/// `page` is the page number as the source declared it: the physical
/// 1-based index for PDFs, the marker number for marked text, or the block
/// counter for unmarked text. Numbers are neither guaranteed contiguous nor
/// unique; the position of a page in [`Document::pages`](super::Document::pages)
/// is the extraction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number as declared by the source
    pub page: u32,

    /// Page text
    pub text: String,

    /// Whether the page looks like tabular data.
    ///
    /// `None` until normalization has flagged the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_table_like: Option<bool>,
}

impl Page {
    /// Create an unflagged page.
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
            is_table_like: None,
        }
    }

    /// Return the same page with its text replaced.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self
        }
    }

    /// Return the same page carrying a table-likeness flag.
    pub fn with_table_flag(self, is_table_like: bool) -> Self {
        Self {
            is_table_like: Some(is_table_like),
            ..self
        }
    }

    /// Check if the page has no text after stripping whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether the page has been flagged as table-like.
    ///
    /// Unflagged pages report `false`.
    pub fn is_flagged_table(&self) -> bool {
        self.is_table_like == Some(true)
    }

    /// Character count of the page text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
