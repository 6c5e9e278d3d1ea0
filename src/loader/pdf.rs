//! Page extraction for PDF sources.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::model::Page;

use super::backend::{LopdfTextSource, PdfTextSource};

/// Turns a PDF into pages, omitting pages with no text.
///
/// Page numbers are the 1-based physical page index, so omitted blank pages
/// leave gaps in the numbering.
#[derive(Clone)]
pub struct PdfPageExtractor {
    source: Arc<dyn PdfTextSource>,
}

impl PdfPageExtractor {
    /// Create an extractor over the given text source.
    pub fn new(source: Arc<dyn PdfTextSource>) -> Self {
        Self { source }
    }

    /// Extract the non-blank pages of a PDF file.
    pub fn extract(&self, path: &Path) -> Result<Vec<Page>> {
        let texts = self.source.page_texts(path)?;
        let total = texts.len();
        let pages = pages_from_texts(texts);

        log::debug!(
            "Extracted {} of {} pages from {}",
            pages.len(),
            total,
            path.display()
        );
        Ok(pages)
    }
}

impl Default for PdfPageExtractor {
    fn default() -> Self {
        Self::new(Arc::new(LopdfTextSource::new()))
    }
}

impl std::fmt::Debug for PdfPageExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfPageExtractor").finish_non_exhaustive()
    }
}

/// Build pages from per-page texts, numbering by physical index.
pub fn pages_from_texts<I, S>(texts: I) -> Vec<Page>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .zip(1u32..)
        .filter_map(|(text, number)| {
            let text = text.as_ref().trim();
            (!text.is_empty()).then(|| Page::new(number, text))
        })
        .collect()
}
