//! Integration tests for document resolution and loading.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use vaultdoc::error::{Error, Result};
use vaultdoc::{
    normalize_document_with_options, FileType, LoadOptions, Loader, NormalizeOptions, Page,
    PdfTextSource, SourceQuality,
};

/// Text source returning fixed page texts and recording what it was asked for.
struct MockPdfSource {
    pages: Vec<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl MockPdfSource {
    fn new(pages: Vec<&'static str>) -> Self {
        Self {
            pages,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl PdfTextSource for MockPdfSource {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(path.display().to_string());
        Ok(self.pages.iter().map(|s| s.to_string()).collect())
    }
}

struct FailingPdfSource;

impl PdfTextSource for FailingPdfSource {
    fn page_texts(&self, _path: &Path) -> Result<Vec<String>> {
        Err(Error::PdfParse("broken xref".to_string()))
    }
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (rel, content) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

// ==================== Resolution Tests ====================

#[test]
fn test_processed_md_preferred_over_txt_and_raw() {
    let dir = project(&[
        ("data/processed/DOC_1.md", "curated markdown"),
        ("data/processed/DOC_1.txt", "curated text"),
        ("data/raw/DOC_1.pdf", "%PDF-1.4"),
    ]);

    let doc = Loader::default().load(dir.path(), "DOC_1").unwrap();
    assert_eq!(doc.file_type, FileType::Md);
    assert_eq!(doc.source_quality, SourceQuality::Manual);
    assert_eq!(doc.full_text(), "curated markdown");
}

#[test]
fn test_processed_txt_when_no_md() {
    let dir = project(&[
        ("data/processed/DOC_1.txt", "curated text"),
        ("data/raw/DOC_1.md", "raw markdown"),
    ]);

    let doc = Loader::default().load(dir.path(), "DOC_1").unwrap();
    assert_eq!(doc.file_type, FileType::Txt);
    assert_eq!(doc.source_quality, SourceQuality::Manual);
}

#[test]
fn test_raw_only_skips_overrides() {
    let dir = project(&[
        ("data/processed/DOC_1.md", "curated"),
        ("data/raw/DOC_1.txt", "raw text"),
    ]);

    let loader = Loader::new(LoadOptions::new().raw_only());
    let doc = loader.load(dir.path(), "DOC_1").unwrap();
    assert_eq!(doc.source_quality, SourceQuality::Auto);
    assert_eq!(doc.full_text(), "raw text");
}

#[test]
fn test_raw_auto_quality() {
    let dir = project(&[("data/raw/NOTES.txt", "hello")]);
    let doc = Loader::default().load(dir.path(), "NOTES").unwrap();
    assert_eq!(doc.source_quality, SourceQuality::Auto);
    assert_eq!(doc.file_type, FileType::Txt);
    assert_eq!(doc.doc_id, "NOTES");
}

#[test]
fn test_source_path_is_canonical() {
    let dir = project(&[("data/raw/NOTES.txt", "hello")]);
    let doc = Loader::default().load(dir.path(), "NOTES").unwrap();

    let expected = fs::canonicalize(dir.path().join("data/raw/NOTES.txt")).unwrap();
    assert!(doc.source_path().is_absolute());
    assert_eq!(doc.source_path(), expected.as_path());
}

#[test]
fn test_not_found() {
    let dir = project(&[("data/raw/OTHER.txt", "x")]);
    let result = Loader::default().load(dir.path(), "MISSING");
    assert!(matches!(result, Err(Error::NotFound { doc_id }) if doc_id == "MISSING"));
}

#[test]
fn test_not_found_without_raw_dir() {
    let dir = TempDir::new().unwrap();
    let result = Loader::default().load(dir.path(), "ANY");
    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[test]
fn test_prefix_match_requires_dot() {
    // DOC_10 must not match DOC_1.
    let dir = project(&[("data/raw/DOC_10.txt", "ten")]);
    let result = Loader::default().load(dir.path(), "DOC_1");
    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[test]
fn test_ambiguous_raw_source() {
    let dir = project(&[("data/raw/DOC.txt", "a"), ("data/raw/DOC.pdf", "b")]);

    match Loader::default().load(dir.path(), "DOC") {
        Err(Error::AmbiguousSource { doc_id, candidates }) => {
            assert_eq!(doc_id, "DOC");
            assert_eq!(candidates, vec!["DOC.pdf", "DOC.txt"]);
        }
        other => panic!("expected AmbiguousSource, got {:?}", other),
    }
}

#[test]
fn test_override_resolves_ambiguity() {
    let dir = project(&[
        ("data/raw/DOC.txt", "a"),
        ("data/raw/DOC.pdf", "b"),
        ("data/processed/DOC.txt", "curated"),
    ]);
    let doc = Loader::default().load(dir.path(), "DOC").unwrap();
    assert_eq!(doc.full_text(), "curated");
}

#[test]
fn test_unsupported_type() {
    let dir = project(&[("data/raw/DOC.docx", "binary")]);
    let result = Loader::default().load(dir.path(), "DOC");
    assert!(matches!(result, Err(Error::UnsupportedType(ext)) if ext == "docx"));
}

#[test]
fn test_uppercase_extension_supported() {
    let dir = project(&[("data/raw/DOC.TXT", "shouting")]);
    let doc = Loader::default().load(dir.path(), "DOC").unwrap();
    assert_eq!(doc.file_type, FileType::Txt);
}

#[test]
fn test_uppercase_processed_extension_resolves() {
    let dir = project(&[
        ("data/processed/NOTE.MD", "[[PAGE 2]]curated"),
        ("data/raw/NOTE.pdf", "%PDF-1.4"),
    ]);
    let loader = Loader::default();

    assert_eq!(loader.list_doc_ids(dir.path()).unwrap(), vec!["NOTE"]);
    let doc = loader.load(dir.path(), "NOTE").unwrap();
    assert_eq!(doc.file_type, FileType::Md);
    assert_eq!(doc.source_quality, SourceQuality::Manual);
    assert_eq!(doc.pages(), &[Page::new(2, "curated")]);
}

#[test]
fn test_processed_md_preferred_regardless_of_case() {
    let dir = project(&[
        ("data/processed/NOTE.TXT", "text override"),
        ("data/processed/NOTE.Md", "markdown override"),
    ]);
    let doc = Loader::default().load(dir.path(), "NOTE").unwrap();
    assert_eq!(doc.file_type, FileType::Md);
    assert_eq!(doc.full_text(), "markdown override");
}

#[test]
fn test_invalid_doc_id() {
    let dir = project(&[("data/raw/DOC.txt", "x")]);
    let result = Loader::default().load(dir.path(), "../raw/DOC");
    assert!(matches!(result, Err(Error::InvalidDocId(_))));
}

#[test]
fn test_custom_directories() {
    let dir = project(&[("inbox/DOC.md", "[[PAGE 4]]four")]);
    let loader = Loader::new(LoadOptions::new().with_raw_dir("inbox"));
    let doc = loader.load(dir.path(), "DOC").unwrap();
    assert_eq!(doc.pages(), &[Page::new(4, "four")]);
}

// ==================== Text Splitting Tests ====================

#[test]
fn test_text_with_markers() {
    let dir = project(&[(
        "data/raw/DOC.txt",
        "cover junk\n[[PAGE 3]]\nalpha\n[[ page 5 ]]\nbeta\n[[PAGE 3]]\nagain\n",
    )]);

    let doc = Loader::default().load(dir.path(), "DOC").unwrap();
    assert_eq!(
        doc.pages(),
        &[
            Page::new(3, "alpha"),
            Page::new(5, "beta"),
            Page::new(3, "again")
        ]
    );
    assert_eq!(doc.full_text(), "alpha\n\nbeta\n\nagain");
}

#[test]
fn test_text_block_fallback() {
    let line = "x".repeat(49);
    let content: String = (0..45).map(|_| format!("{}\n", line)).collect();
    let dir = project(&[("data/raw/DOC.txt", &content)]);

    let doc = Loader::default().load(dir.path(), "DOC").unwrap();
    assert_eq!(doc.page_numbers(), vec![1, 2, 3]);
    assert_eq!(doc.pages()[0].text.lines().count(), 20);
    assert_eq!(doc.pages()[1].text.lines().count(), 20);
    assert_eq!(doc.pages()[2].text.lines().count(), 5);
}

#[test]
fn test_text_block_size_option() {
    let content: String = (0..10).map(|i| format!("line {:02} of text\n", i)).collect();
    let dir = project(&[("data/raw/DOC.txt", &content)]);

    let loader = Loader::new(LoadOptions::new().with_block_size(32));
    let doc = loader.load(dir.path(), "DOC").unwrap();
    // 16 characters per line, two lines per page.
    assert_eq!(doc.page_count(), 5);
}

#[test]
fn test_crlf_line_endings_normalized() {
    let dir = project(&[(
        "data/raw/DOC.txt",
        "[[PAGE 1]]\r\nthe coopeti-\r\ntion model\r\n[[PAGE 2]]\rold mac\rline\r\n",
    )]);

    let doc = Loader::default().load(dir.path(), "DOC").unwrap();
    assert_eq!(
        doc.pages(),
        &[
            Page::new(1, "the coopeti-\ntion model"),
            Page::new(2, "old mac\nline")
        ]
    );

    let options = NormalizeOptions::new().with_top_n(0).with_bottom_n(0);
    let normalized = normalize_document_with_options(&doc, options).unwrap();
    assert_eq!(
        normalized.full_text(),
        "the coopetition model\n\nold mac line"
    );
}

#[test]
fn test_invalid_utf8_dropped() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("data/raw");
    fs::create_dir_all(&raw).unwrap();
    fs::write(raw.join("DOC.txt"), b"caf\xC3\xA9\xFF ok").unwrap();

    let doc = Loader::default().load(dir.path(), "DOC").unwrap();
    assert_eq!(doc.full_text(), "café ok");
}

#[test]
fn test_empty_text_file() {
    let dir = project(&[("data/raw/DOC.md", "  \n\n ")]);
    let doc = Loader::default().load(dir.path(), "DOC").unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.full_text(), "");
}

// ==================== PDF Tests ====================

#[test]
fn test_pdf_blank_page_leaves_gap() {
    let dir = project(&[("data/raw/REPORT.pdf", "%PDF-1.7")]);
    let source = Arc::new(MockPdfSource::new(vec![
        "  First page  ",
        " \n\t ",
        "Third page",
    ]));

    let loader = Loader::default().with_pdf_source(source.clone());
    let doc = loader.load(dir.path(), "REPORT").unwrap();

    assert_eq!(doc.file_type, FileType::Pdf);
    assert_eq!(
        doc.pages(),
        &[Page::new(1, "First page"), Page::new(3, "Third page")]
    );
    assert_eq!(doc.full_text(), "First page\n\nThird page");

    let calls = source.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].ends_with("REPORT.pdf"));
}

#[test]
fn test_pdf_source_error_propagates() {
    let dir = project(&[("data/raw/REPORT.pdf", "%PDF-1.7")]);
    let loader = Loader::default().with_pdf_source(Arc::new(FailingPdfSource));
    let result = loader.load(dir.path(), "REPORT");
    assert!(matches!(result, Err(Error::PdfParse(_))));
}

#[test]
fn test_pdf_without_header_rejected_by_default_source() {
    let dir = project(&[("data/raw/FAKE.pdf", "this is plain text")]);
    let result = Loader::default().load(dir.path(), "FAKE");
    assert!(matches!(result, Err(Error::UnknownFormat)));
}

// ==================== Project Tests ====================

#[test]
fn test_list_doc_ids() {
    let dir = project(&[
        ("data/raw/B.pdf", "%PDF-1.4"),
        ("data/raw/A.txt", "a"),
        ("data/raw/A.md", "a"),
        ("data/raw/.hidden.txt", "h"),
        ("data/raw/notes.docx", "unsupported"),
        ("data/processed/C.md", "curated only"),
        ("data/processed/D.pdf", "not an override type"),
    ]);

    let ids = Loader::default().list_doc_ids(dir.path()).unwrap();
    assert_eq!(ids, vec!["A", "B", "C"]);

    let raw_only = Loader::new(LoadOptions::new().raw_only());
    assert_eq!(raw_only.list_doc_ids(dir.path()).unwrap(), vec!["A", "B"]);
}

#[test]
fn test_list_doc_ids_empty_project() {
    let dir = TempDir::new().unwrap();
    assert!(Loader::default().list_doc_ids(dir.path()).unwrap().is_empty());
}

#[test]
fn test_load_project_continues_past_failures() {
    let dir = project(&[
        ("data/raw/GOOD.txt", "fine"),
        ("data/raw/TWIN.txt", "one"),
        ("data/raw/TWIN.md", "two"),
        ("data/raw/FAKE.pdf", "not a pdf"),
        ("data/processed/CURATED.md", "[[PAGE 2]]curated"),
    ]);

    let results = Loader::default().load_project(dir.path()).unwrap();
    let ids: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["CURATED", "FAKE", "GOOD", "TWIN"]);

    assert_eq!(results[0].1.as_ref().unwrap().page_numbers(), vec![2]);
    assert!(matches!(results[1].1, Err(Error::UnknownFormat)));
    assert_eq!(results[2].1.as_ref().unwrap().full_text(), "fine");
    assert!(matches!(results[3].1, Err(Error::AmbiguousSource { .. })));
    assert!(results.iter().filter_map(|(_, r)| r.as_ref().err()).all(Error::is_terminal));
}
