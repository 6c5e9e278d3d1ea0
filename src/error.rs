//! Error types for vaultdoc.

use std::io;
use thiserror::Error;

/// Result type alias for vaultdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or normalizing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading project files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No raw or processed file matches the document id.
    #[error("No source file found for doc_id: {doc_id}")]
    NotFound {
        /// The requested document id
        doc_id: String,
    },

    /// More than one raw file matches the document id.
    #[error("Multiple source files found for doc_id {doc_id}: {}", .candidates.join(", "))]
    AmbiguousSource {
        /// The requested document id
        doc_id: String,
        /// File names of all matching candidates
        candidates: Vec<String>,
    },

    /// The resolved file has an extension outside pdf/txt/md.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// The document id cannot name a file (empty or contains a path separator).
    #[error("Invalid doc_id: {0:?}")]
    InvalidDocId(String),

    /// A `.pdf` file that does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error parsing PDF structure or extracting page text.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// An option value is out of range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Error serializing a document.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl Error {
    /// Whether the error reflects a data or configuration problem rather
    /// than a transient I/O fault. Terminal errors are never worth retrying.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
