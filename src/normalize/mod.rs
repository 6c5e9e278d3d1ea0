//! Normalization of loaded documents for retrieval.
//!
//! Stages run in a fixed order, each producing new pages:
//!
//! 1. whitespace and hyphenation cleanup (per page)
//! 2. boilerplate detection (across all pages)
//! 3. boilerplate removal (per page)
//! 4. table flagging (per page, on un-reflowed text)
//! 5. reflow (per page)
//! 6. optional removal of table-like pages
//!
//! Steps 2 and 4 read the original line breaks, so reflow runs after both.
//! The input document is never modified.

mod boilerplate;
mod cleaner;
mod options;
mod reflow;
mod report;
mod table;

pub use boilerplate::{remove_lines, BoilerplateDetector};
pub use cleaner::{fix_hyphenation, normalize_whitespace, TextCleaner};
pub use options::NormalizeOptions;
pub use reflow::{reflow, Reflower};
pub use report::NormalizeReport;
pub use table::{TableFlagger, TableFlaggerConfig};

use rayon::prelude::*;

use crate::model::{Document, Page};

/// Runs the normalization pipeline.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a document, returning a new one.
    pub fn normalize(&self, document: &Document) -> Document {
        self.normalize_with_report(document).0
    }

    /// Normalize a document and report what changed.
    pub fn normalize_with_report(&self, document: &Document) -> (Document, NormalizeReport) {
        let cleaner = TextCleaner::new();
        let detector = BoilerplateDetector::new(
            self.options.top_n,
            self.options.bottom_n,
            self.options.threshold,
        );
        let flagger = TableFlagger::with_config(self.options.table);
        let reflower = Reflower::new();

        let cleaned = self.map_pages(document.pages().to_vec(), |page| {
            let text = cleaner.clean(&page.text);
            page.with_text(text)
        });

        // Every page must be cleaned before counting starts.
        let boilerplate = detector.detect(&cleaned);
        if !boilerplate.is_empty() {
            log::debug!(
                "{}: {} boilerplate lines detected",
                document.doc_id,
                boilerplate.len()
            );
        }

        let processed = self.map_pages(cleaned, |page| {
            let stripped = remove_lines(&page.text, &boilerplate);
            let is_table_like = flagger.is_table_like(&stripped);
            let text = reflower.reflow(&stripped);
            page.with_text(text).with_table_flag(is_table_like)
        });

        let table_like_pages: Vec<u32> = processed
            .iter()
            .filter(|p| p.is_flagged_table())
            .map(|p| p.page)
            .collect();

        let before = processed.len();
        let pages: Vec<Page> = if self.options.drop_table_like_pages {
            processed
                .into_iter()
                .filter(|p| !p.is_flagged_table())
                .collect()
        } else {
            processed
        };
        let dropped_pages = before - pages.len();

        let normalized = document.with_pages(pages);
        if normalized.full_text().is_empty() && !document.full_text().is_empty() {
            log::warn!("{}: normalization removed all text", document.doc_id);
        }

        let mut boilerplate_lines: Vec<String> = boilerplate.into_iter().collect();
        boilerplate_lines.sort();

        let report = NormalizeReport {
            page_count: document.page_count(),
            boilerplate_lines,
            table_like_pages,
            dropped_pages,
            char_count_before: document.full_text().chars().count(),
            char_count_after: normalized.full_text().chars().count(),
        };

        (normalized, report)
    }

    fn map_pages<F>(&self, pages: Vec<Page>, f: F) -> Vec<Page>
    where
        F: Fn(Page) -> Page + Send + Sync,
    {
        if self.options.parallel {
            pages.into_par_iter().map(f).collect()
        } else {
            pages.into_iter().map(f).collect()
        }
    }
}
