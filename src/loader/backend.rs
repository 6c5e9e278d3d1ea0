//! PDF text source abstraction.
//!
//! Page-level text extraction from PDF binaries is delegated to a
//! [`PdfTextSource`]. The loader never touches a concrete PDF library
//! directly, so tests and callers can inject their own extractor.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::pdf_version_from_path;
use crate::error::{Error, Result};

/// Capability to extract the text of each physical page of a PDF.
pub trait PdfTextSource: Send + Sync {
    /// Return one string per physical page, in document order.
    ///
    /// Blank pages must still be returned (as blank strings) so page
    /// numbering stays aligned with the physical page index.
    fn page_texts(&self, path: &Path) -> Result<Vec<String>>;
}

/// Error handling mode for per-page extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the whole document on the first page that cannot be extracted
    #[default]
    Strict,
    /// Treat pages that cannot be extracted as blank
    Lenient,
}

/// [`PdfTextSource`] backed by `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfTextSource {
    error_mode: ErrorMode,
}

impl LopdfTextSource {
    /// Create a strict lopdf text source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat pages whose text cannot be extracted as blank.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Current error mode.
    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }
}

impl PdfTextSource for LopdfTextSource {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>> {
        let version = pdf_version_from_path(path)?;
        log::debug!("Opening PDF {} (version {})", path.display(), version);

        let doc = LopdfDocument::load(path)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(text) => texts.push(text),
                Err(e) if self.error_mode == ErrorMode::Lenient => {
                    log::warn!(
                        "Skipping unreadable page {} of {}: {}",
                        page_num,
                        path.display(),
                        e
                    );
                    texts.push(String::new());
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(texts)
    }
}
