//! Resolving document ids to files and extracting their pages.
//!
//! A document id resolves first against the processed directory (curated
//! `.md`/`.txt` overrides, `.md` first) and then against the raw directory,
//! where exactly one `<doc_id>.<ext>` file must exist.

mod backend;
mod options;
mod pdf;
mod splitter;

pub use backend::{ErrorMode, LopdfTextSource, PdfTextSource};
pub use options::{LoadOptions, DEFAULT_BLOCK_SIZE};
pub use pdf::{pages_from_texts, PdfPageExtractor};
pub use splitter::{has_page_markers, PageSplitter};

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::detect::detect_file_type;
use crate::error::{Error, Result};
use crate::model::{Document, FileType, Page, SourceQuality};

/// Curated override extensions, in preference order.
const PROCESSED_EXTENSIONS: [FileType; 2] = [FileType::Md, FileType::Txt];

/// A document id resolved to a concrete file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Path of the matching file (not yet canonicalized)
    pub path: PathBuf,
    /// File type from the extension
    pub file_type: FileType,
    /// Where the file was found
    pub source_quality: SourceQuality,
}

/// Loads documents from a project tree.
#[derive(Debug, Clone)]
pub struct Loader {
    options: LoadOptions,
    pdf: PdfPageExtractor,
    splitter: PageSplitter,
}

impl Loader {
    /// Create a loader using the lopdf text source.
    pub fn new(options: LoadOptions) -> Self {
        let splitter = PageSplitter::new(options.block_size);
        Self {
            options,
            pdf: PdfPageExtractor::default(),
            splitter,
        }
    }

    /// Replace the PDF text source.
    pub fn with_pdf_source(mut self, source: Arc<dyn PdfTextSource>) -> Self {
        self.pdf = PdfPageExtractor::new(source);
        self
    }

    /// Load options in use.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Resolve and load a document.
    pub fn load(&self, project_root: &Path, doc_id: &str) -> Result<Document> {
        let resolved = self.resolve(project_root, doc_id)?;
        let source_path = fs::canonicalize(&resolved.path)?;

        let pages = match resolved.file_type {
            FileType::Pdf => self.pdf.extract(&source_path)?,
            FileType::Txt | FileType::Md => self.split_text_file(&source_path)?,
        };

        log::debug!(
            "Loaded {} ({}, {}) with {} pages",
            doc_id,
            resolved.file_type,
            resolved.source_quality,
            pages.len()
        );

        Ok(Document::new(
            doc_id,
            source_path,
            resolved.file_type,
            resolved.source_quality,
            pages,
        ))
    }

    /// Find the file a document id refers to without reading it.
    pub fn resolve(&self, project_root: &Path, doc_id: &str) -> Result<ResolvedSource> {
        validate_doc_id(doc_id)?;

        if self.options.prefer_processed {
            let processed_dir = project_root.join(&self.options.processed_dir);
            if let Some((path, file_type)) = processed_override(&processed_dir, doc_id)? {
                log::debug!("Using manual override {}", path.display());
                return Ok(ResolvedSource {
                    path,
                    file_type,
                    source_quality: SourceQuality::Manual,
                });
            }
        }

        let raw_dir = project_root.join(&self.options.raw_dir);
        let mut candidates = raw_candidates(&raw_dir, doc_id)?;
        match candidates.len() {
            0 => Err(Error::NotFound {
                doc_id: doc_id.to_string(),
            }),
            1 => {
                let path = candidates.remove(0);
                let file_type = detect_file_type(&path)?;
                Ok(ResolvedSource {
                    path,
                    file_type,
                    source_quality: SourceQuality::Auto,
                })
            }
            _ => Err(Error::AmbiguousSource {
                doc_id: doc_id.to_string(),
                candidates: candidates
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect(),
            }),
        }
    }

    /// List the document ids resolvable in a project.
    ///
    /// Collects the stems of non-hidden files with a supported extension in
    /// the raw directory, plus `.md`/`.txt` overrides in the processed
    /// directory. Missing directories contribute nothing.
    pub fn list_doc_ids(&self, project_root: &Path) -> Result<Vec<String>> {
        let mut ids = BTreeSet::new();

        let raw_dir = project_root.join(&self.options.raw_dir);
        collect_stems(&raw_dir, &FileType::ALL, &mut ids)?;

        if self.options.prefer_processed {
            let processed_dir = project_root.join(&self.options.processed_dir);
            collect_stems(&processed_dir, &PROCESSED_EXTENSIONS, &mut ids)?;
        }

        Ok(ids.into_iter().collect())
    }

    /// Load every document in a project.
    ///
    /// Each document is loaded independently; a failure is reported in its
    /// slot and never stops the others.
    pub fn load_project(&self, project_root: &Path) -> Result<Vec<(String, Result<Document>)>> {
        let ids = self.list_doc_ids(project_root)?;
        log::debug!("Loading {} documents from {}", ids.len(), project_root.display());

        Ok(ids
            .into_par_iter()
            .map(|doc_id| {
                let result = self.load(project_root, &doc_id);
                if let Err(ref e) = result {
                    log::warn!("Failed to load {}: {}", doc_id, e);
                }
                (doc_id, result)
            })
            .collect())
    }

    fn split_text_file(&self, path: &Path) -> Result<Vec<Page>> {
        let bytes = fs::read(path)?;
        let (content, lossy) = decode_utf8_ignoring_errors(&bytes);
        if lossy {
            log::warn!("Dropped invalid UTF-8 bytes from {}", path.display());
        }
        Ok(self.splitter.split(&normalize_line_endings(&content)))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(LoadOptions::default())
    }
}

fn validate_doc_id(doc_id: &str) -> Result<()> {
    let invalid = doc_id.trim().is_empty()
        || doc_id == "."
        || doc_id == ".."
        || doc_id.contains(['/', '\\']);
    if invalid {
        return Err(Error::InvalidDocId(doc_id.to_string()));
    }
    Ok(())
}

/// The preferred `<doc_id>.md`/`<doc_id>.txt` override in `processed_dir`.
///
/// Extensions match case-insensitively. Markdown wins over text; ties within
/// one type go to the first name in sort order.
fn processed_override(
    processed_dir: &Path,
    doc_id: &str,
) -> Result<Option<(PathBuf, FileType)>> {
    if !processed_dir.is_dir() {
        return Ok(None);
    }

    let mut best: Option<(usize, PathBuf, FileType)> = None;
    for entry in fs::read_dir(processed_dir)? {
        let path = entry?.path();
        if path.file_stem().and_then(|s| s.to_str()) != Some(doc_id) || !path.is_file() {
            continue;
        }
        let Ok(file_type) = detect_file_type(&path) else {
            continue;
        };
        let Some(rank) = PROCESSED_EXTENSIONS.iter().position(|t| *t == file_type) else {
            continue;
        };
        let better = match &best {
            Some((best_rank, best_path, _)) => (rank, &path) < (*best_rank, best_path),
            None => true,
        };
        if better {
            best = Some((rank, path, file_type));
        }
    }

    Ok(best.map(|(_, path, file_type)| (path, file_type)))
}

/// Regular files in `raw_dir` named `<doc_id>.<anything>`, sorted by name.
fn raw_candidates(raw_dir: &Path, doc_id: &str) -> Result<Vec<PathBuf>> {
    if !raw_dir.is_dir() {
        return Ok(Vec::new());
    }

    let prefix = format!("{}.", doc_id);
    let mut candidates = Vec::new();
    for entry in fs::read_dir(raw_dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&prefix));
        if matches && path.is_file() {
            candidates.push(path);
        }
    }

    candidates.sort();
    Ok(candidates)
}

fn collect_stems(dir: &Path, allowed: &[FileType], ids: &mut BTreeSet<String>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || !path.is_file() {
            continue;
        }
        let supported = detect_file_type(&path).is_ok_and(|t| allowed.contains(&t));
        if let (true, Some(stem)) = (supported, path.file_stem().and_then(|s| s.to_str())) {
            ids.insert(stem.to_string());
        }
    }

    Ok(())
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Decode UTF-8, dropping invalid byte sequences and a leading BOM.
///
/// Returns the text and whether anything invalid was dropped.
pub fn decode_utf8_ignoring_errors(bytes: &[u8]) -> (String, bool) {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut text = String::with_capacity(bytes.len());
    let mut lossy = false;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        lossy |= !chunk.invalid().is_empty();
    }
    (text, lossy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_doc_id() {
        assert!(validate_doc_id("ACME_001").is_ok());
        assert!(matches!(validate_doc_id(""), Err(Error::InvalidDocId(_))));
        assert!(matches!(validate_doc_id(" "), Err(Error::InvalidDocId(_))));
        assert!(matches!(validate_doc_id(".."), Err(Error::InvalidDocId(_))));
        assert!(matches!(
            validate_doc_id("../secret"),
            Err(Error::InvalidDocId(_))
        ));
    }

    #[test]
    fn test_decode_drops_invalid_bytes() {
        let (text, lossy) = decode_utf8_ignoring_errors(b"caf\xC3\xA9 \xFF\xFEok");
        assert_eq!(text, "café ok");
        assert!(lossy);

        let (text, lossy) = decode_utf8_ignoring_errors("plain".as_bytes());
        assert_eq!(text, "plain");
        assert!(!lossy);
    }

    #[test]
    fn test_decode_strips_bom() {
        let (text, lossy) = decode_utf8_ignoring_errors(b"\xEF\xBB\xBF[[PAGE 1]]x");
        assert_eq!(text, "[[PAGE 1]]x");
        assert!(!lossy);
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(normalize_line_endings("plain\n"), "plain\n");
    }

    #[test]
    fn test_missing_project_is_not_found() {
        let loader = Loader::default();
        let err = loader
            .resolve(Path::new("/nonexistent/project"), "ACME_001")
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
