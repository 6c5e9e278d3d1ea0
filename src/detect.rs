//! Source file type detection.

use crate::error::{Error, Result};
use crate::model::FileType;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"
/// Readers accept junk before the header within this many bytes.
const HEADER_SEARCH_LEN: usize = 1024;

/// Determine the file type of a path from its extension.
///
/// Returns [`Error::UnsupportedType`] for extensions outside pdf/txt/md,
/// including files without an extension.
pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
    let ext = path
        .as_ref()
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    FileType::from_extension(&ext).ok_or(Error::UnsupportedType(ext))
}

/// Read the PDF version from the header of a file.
///
/// Returns [`Error::UnknownFormat`] if no `%PDF-x.y` header appears in the
/// first 1024 bytes.
pub fn pdf_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(HEADER_SEARCH_LEN);
    File::open(path)?
        .take(HEADER_SEARCH_LEN as u64)
        .read_to_end(&mut header)?;
    pdf_version_from_bytes(&header)
}

/// Read the PDF version from the leading bytes of a file.
///
/// The header may be preceded by junk, as long as it starts within the
/// first 1024 bytes.
pub fn pdf_version_from_bytes(data: &[u8]) -> Result<String> {
    let window = &data[..data.len().min(HEADER_SEARCH_LEN)];
    let start = window
        .windows(PDF_MAGIC_LEN)
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version_start = start + PDF_MAGIC_LEN;
    let version = data
        .get(version_start..version_start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;
    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).into_owned())
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if bytes carry a valid PDF header near the start.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version_from_bytes(data).is_ok()
}
