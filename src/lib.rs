//! # vaultdoc
//!
//! Document ingestion and normalization for retrieval pipelines.
//!
//! A project tree holds source documents under `data/raw/` (PDF, plain text
//! or Markdown) and optional curated overrides under `data/processed/`.
//! Loading resolves a document id to one file and splits it into numbered
//! pages. Normalization cleans those pages for indexing: whitespace and
//! hyphenation fixes, running header/footer removal, table flagging and
//! paragraph reflow.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultdoc::{load_document, normalize_document, render};
//!
//! fn main() -> vaultdoc::Result<()> {
//!     let doc = load_document("./vault", "CONTRACT_001")?;
//!     let normalized = normalize_document(&doc);
//!
//!     let json = render::to_json(&normalized, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Source resolution**: manual overrides win over raw files
//! - **Page-aware loading**: physical PDF pages, `[[PAGE n]]` markers, or
//!   fixed-size blocks for plain text
//! - **Boilerplate removal**: lines repeated at page edges are dropped
//! - **Table flagging**: pages dominated by short lines are marked
//! - **Parallel processing**: Rayon across pages and across documents

pub mod detect;
pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_file_type, is_pdf_bytes};
pub use error::{Error, Result};
pub use loader::{
    ErrorMode, LoadOptions, Loader, LopdfTextSource, PageSplitter, PdfPageExtractor,
    PdfTextSource,
};
pub use model::{Document, FileType, Page, SourceQuality};
pub use normalize::{NormalizeOptions, NormalizeReport, Normalizer, TableFlaggerConfig};
pub use render::{JsonFormat, OutputFormat};

use std::path::Path;
use std::sync::Arc;

/// Load a document from a project tree with default options.
///
/// # Example
///
/// ```no_run
/// use vaultdoc::load_document;
///
/// let doc = load_document("./vault", "REPORT_2023").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_document<P: AsRef<Path>>(project_root: P, doc_id: &str) -> Result<Document> {
    Loader::default().load(project_root.as_ref(), doc_id)
}

/// Load a document with custom options.
pub fn load_document_with_options<P: AsRef<Path>>(
    project_root: P,
    doc_id: &str,
    options: LoadOptions,
) -> Result<Document> {
    options.validate()?;
    Loader::new(options).load(project_root.as_ref(), doc_id)
}

/// Normalize a document with default options.
///
/// The input is left untouched; a new document is returned.
pub fn normalize_document(document: &Document) -> Document {
    Normalizer::default().normalize(document)
}

/// Normalize a document with custom options.
///
/// # Example
///
/// ```no_run
/// use vaultdoc::{load_document, normalize_document_with_options, NormalizeOptions};
///
/// let doc = load_document("./vault", "REPORT_2023")?;
/// let options = NormalizeOptions::new()
///     .with_threshold(0.8)
///     .drop_table_like_pages();
/// let normalized = normalize_document_with_options(&doc, options)?;
/// # Ok::<(), vaultdoc::Error>(())
/// ```
pub fn normalize_document_with_options(
    document: &Document,
    options: NormalizeOptions,
) -> Result<Document> {
    options.validate()?;
    Ok(Normalizer::new(options).normalize(document))
}

/// Builder for loading and normalizing documents.
///
/// # Example
///
/// ```no_run
/// use vaultdoc::Vaultdoc;
///
/// let doc = Vaultdoc::new()
///     .with_block_size(2000)
///     .with_threshold(0.75)
///     .lenient_pdf()
///     .process("./vault", "MANUAL_7")?;
/// # Ok::<(), vaultdoc::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct Vaultdoc {
    load_options: LoadOptions,
    normalize_options: NormalizeOptions,
    pdf_source: Option<Arc<dyn PdfTextSource>>,
}

impl Vaultdoc {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all load options.
    pub fn with_load_options(mut self, options: LoadOptions) -> Self {
        self.load_options = options;
        self
    }

    /// Replace all normalize options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize_options = options;
        self
    }

    /// Set the character budget for marker-less text pages.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.load_options = self.load_options.with_block_size(block_size);
        self
    }

    /// Set the raw directory, relative to the project root.
    pub fn with_raw_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.load_options = self.load_options.with_raw_dir(dir);
        self
    }

    /// Set the processed directory, relative to the project root.
    pub fn with_processed_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.load_options = self.load_options.with_processed_dir(dir);
        self
    }

    /// Ignore manual overrides.
    pub fn raw_only(mut self) -> Self {
        self.load_options = self.load_options.raw_only();
        self
    }

    /// Set how many leading lines per page are boilerplate candidates.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.normalize_options = self.normalize_options.with_top_n(top_n);
        self
    }

    /// Set how many trailing lines per page are boilerplate candidates.
    pub fn with_bottom_n(mut self, bottom_n: usize) -> Self {
        self.normalize_options = self.normalize_options.with_bottom_n(bottom_n);
        self
    }

    /// Set the page-share threshold for boilerplate.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.normalize_options = self.normalize_options.with_threshold(threshold);
        self
    }

    /// Remove table-like pages after normalization.
    pub fn drop_table_like_pages(mut self) -> Self {
        self.normalize_options = self.normalize_options.drop_table_like_pages();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.normalize_options = self.normalize_options.sequential();
        self
    }

    /// Use a custom PDF text source.
    pub fn with_pdf_source(mut self, source: Arc<dyn PdfTextSource>) -> Self {
        self.pdf_source = Some(source);
        self
    }

    /// Treat unreadable PDF pages as blank instead of failing.
    pub fn lenient_pdf(self) -> Self {
        self.with_pdf_source(Arc::new(LopdfTextSource::new().lenient()))
    }

    /// Check all options.
    pub fn validate(&self) -> Result<()> {
        self.load_options.validate()?;
        self.normalize_options.validate()
    }

    /// Build the configured loader.
    pub fn loader(&self) -> Loader {
        let loader = Loader::new(self.load_options.clone());
        match &self.pdf_source {
            Some(source) => loader.with_pdf_source(Arc::clone(source)),
            None => loader,
        }
    }

    /// Build the configured normalizer.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.normalize_options.clone())
    }

    /// Load a document without normalizing it.
    pub fn load<P: AsRef<Path>>(&self, project_root: P, doc_id: &str) -> Result<Document> {
        self.validate()?;
        self.loader().load(project_root.as_ref(), doc_id)
    }

    /// Load and normalize a document.
    pub fn process<P: AsRef<Path>>(&self, project_root: P, doc_id: &str) -> Result<Document> {
        Ok(self.process_with_report(project_root, doc_id)?.0)
    }

    /// Load and normalize a document, returning the normalization report.
    pub fn process_with_report<P: AsRef<Path>>(
        &self,
        project_root: P,
        doc_id: &str,
    ) -> Result<(Document, NormalizeReport)> {
        let document = self.load(project_root, doc_id)?;
        Ok(self.normalizer().normalize_with_report(&document))
    }

    /// Document ids available in the raw directory.
    pub fn list_doc_ids<P: AsRef<Path>>(&self, project_root: P) -> Result<Vec<String>> {
        self.loader().list_doc_ids(project_root.as_ref())
    }

    /// Load and normalize every document in the project.
    ///
    /// A document that fails to load does not stop the others; its error is
    /// returned alongside its id.
    pub fn process_project<P: AsRef<Path>>(
        &self,
        project_root: P,
    ) -> Result<Vec<(String, Result<Document>)>> {
        self.validate()?;
        let normalizer = self.normalizer();
        let loaded = self.loader().load_project(project_root.as_ref())?;

        Ok(loaded
            .into_iter()
            .map(|(doc_id, result)| {
                let normalized = result.map(|doc| normalizer.normalize(&doc));
                (doc_id, normalized)
            })
            .collect())
    }
}
