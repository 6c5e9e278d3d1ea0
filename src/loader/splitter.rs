//! Splitting plain-text content into pages.
//!
//! Text with explicit `[[PAGE n]]` markers is split at the markers and the
//! marker numbers are trusted as-is. Text without any marker is cut into
//! line-aligned blocks of roughly `block_size` characters.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::model::Page;

use super::options::DEFAULT_BLOCK_SIZE;

fn page_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\[\[\s*PAGE\s*(\d+)\s*\]\]").unwrap())
}

/// Splits text content into provenance-tagged pages.
#[derive(Debug, Clone, Copy)]
pub struct PageSplitter {
    block_size: usize,
}

impl PageSplitter {
    /// Create a splitter with the given block size for unmarked text.
    pub fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    /// Block size used when no page markers are present.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Split content into pages.
    ///
    /// A single page marker anywhere in the content switches the whole
    /// document to marker splitting.
    pub fn split(&self, content: &str) -> Vec<Page> {
        let markers: Vec<Captures<'_>> = page_marker_regex().captures_iter(content).collect();
        if markers.is_empty() {
            split_into_blocks(content, self.block_size)
        } else {
            log::debug!("Splitting on {} page markers", markers.len());
            split_on_markers(content, &markers)
        }
    }
}

impl Default for PageSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

/// Check whether content contains at least one page marker.
pub fn has_page_markers(content: &str) -> bool {
    page_marker_regex().is_match(content)
}

fn split_on_markers(content: &str, markers: &[Captures<'_>]) -> Vec<Page> {
    let mut pages = Vec::with_capacity(markers.len());

    for (i, caps) in markers.iter().enumerate() {
        // Group 0 always participates in a match.
        let Some(whole) = caps.get(0) else { continue };
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(content.len(), |m| m.start());

        let text = content[whole.end()..end].trim();
        if text.is_empty() {
            continue;
        }

        let number = parse_page_number(&caps[1]);
        pages.push(Page::new(number, text));
    }

    pages
}

fn parse_page_number(digits: &str) -> u32 {
    digits.parse().unwrap_or_else(|_| {
        log::warn!("Page marker number {} out of range, clamping", digits);
        u32::MAX
    })
}

/// Accumulate whole lines until the buffer reaches `block_size` characters.
///
/// The length check runs after a line is appended, so a block may overshoot
/// the threshold by up to one line.
fn split_into_blocks(content: &str, block_size: usize) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;
    let mut number = 1u32;

    for line in content.lines() {
        current.push_str(line);
        current.push('\n');
        current_chars += line.chars().count() + 1;

        if current_chars >= block_size {
            pages.push(Page::new(number, current.trim()));
            current.clear();
            current_chars = 0;
            number += 1;
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        pages.push(Page::new(number, rest));
    }

    pages
}
