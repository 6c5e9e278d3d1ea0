//! Document-level types.

use super::Page;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Separator placed between page texts in [`Document::full_text`].
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Source file type of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF, extracted page by page
    Pdf,
    /// Plain text
    Txt,
    /// Markdown
    Md,
}

impl FileType {
    /// All supported file types.
    pub const ALL: [FileType; 3] = [FileType::Pdf, FileType::Txt, FileType::Md];

    /// Map a file extension (without the dot, any case) to a file type.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "txt" => Some(FileType::Txt),
            "md" => Some(FileType::Md),
            _ => None,
        }
    }

    /// Lowercase extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Txt => "txt",
            FileType::Md => "md",
        }
    }

    /// Whether pages come from plain-text splitting rather than PDF extraction.
    pub fn is_text(&self) -> bool {
        matches!(self, FileType::Txt | FileType::Md)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Provenance of the file a document was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceQuality {
    /// A manually curated text override from the processed directory
    Manual,
    /// Automatically extracted raw upload
    Auto,
}

impl fmt::Display for SourceQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceQuality::Manual => f.write_str("manual"),
            SourceQuality::Auto => f.write_str("auto"),
        }
    }
}

/// A loaded document with page-level provenance.
///
/// `full_text` is derived from the pages and rebuilt every time a new page
/// sequence is installed, so the two never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DocumentRecord")]
pub struct Document {
    /// Project-unique document identifier
    pub doc_id: String,

    /// Absolute, canonical path of the source file
    pub source_path: PathBuf,

    /// Source file type
    pub file_type: FileType,

    /// Whether the source was a manual override or a raw upload
    pub source_quality: SourceQuality,

    pages: Vec<Page>,

    full_text: String,
}

impl Document {
    /// Create a document from its pages.
    pub fn new(
        doc_id: impl Into<String>,
        source_path: impl Into<PathBuf>,
        file_type: FileType,
        source_quality: SourceQuality,
        pages: Vec<Page>,
    ) -> Self {
        let full_text = join_pages(&pages);
        Self {
            doc_id: doc_id.into(),
            source_path: source_path.into(),
            file_type,
            source_quality,
            pages,
            full_text,
        }
    }

    /// Return a new document with the same provenance and a new page sequence.
    pub fn with_pages(&self, pages: Vec<Page>) -> Self {
        Self::new(
            self.doc_id.clone(),
            self.source_path.clone(),
            self.file_type,
            self.source_quality,
            pages,
        )
    }

    /// Pages in extraction order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Consume the document, returning its pages.
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    /// Non-blank page texts joined with a blank line.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Source path as a `Path`.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Find the first page carrying the given number.
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page == number)
    }

    /// Page numbers in extraction order.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.pages.iter().map(|p| p.page).collect()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of pages flagged as table-like.
    pub fn table_like_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_flagged_table()).count()
    }
}

/// Join the texts of all non-blank pages with [`PAGE_SEPARATOR`].
pub fn join_pages(pages: &[Page]) -> String {
    pages
        .iter()
        .filter(|p| !p.is_blank())
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// Wire shape of a document; `full_text` is ignored on input and rebuilt.
#[derive(Deserialize)]
struct DocumentRecord {
    doc_id: String,
    source_path: PathBuf,
    file_type: FileType,
    source_quality: SourceQuality,
    pages: Vec<Page>,
    #[serde(default)]
    #[allow(dead_code)]
    full_text: Option<String>,
}

impl From<DocumentRecord> for Document {
    fn from(record: DocumentRecord) -> Self {
        Document::new(
            record.doc_id,
            record.source_path,
            record.file_type,
            record.source_quality,
            record.pages,
        )
    }
}
