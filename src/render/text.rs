//! Plain text rendering for documents.

use crate::model::Document;

/// The document's full text, newline-terminated when non-empty.
pub fn to_text(doc: &Document) -> String {
    let text = doc.full_text();
    if text.is_empty() {
        String::new()
    } else {
        format!("{}\n", text)
    }
}

/// Text with a `[[PAGE n]]` marker before each non-blank page.
///
/// Loading the output as a text file reproduces the page numbering, so a
/// normalized document can be saved back as a manual override.
pub fn to_marked_text(doc: &Document) -> String {
    let mut output = String::new();
    for page in doc.pages().iter().filter(|p| !p.is_blank()) {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("[[PAGE {}]]\n{}\n", page.page, page.text.trim()));
    }
    output
}
