//! Rendering documents to output formats.

mod json;
mod text;

pub use json::{report_to_json, to_json, JsonFormat};
pub use text::{to_marked_text, to_text};

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Document;

/// Output format for a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON document with pages and full text
    #[default]
    Json,
    /// Full text only
    Text,
    /// Text with `[[PAGE n]]` markers
    Marked,
}

impl OutputFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
            OutputFormat::Marked => "md",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
            OutputFormat::Marked => "marked",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            "marked" | "md" => Ok(OutputFormat::Marked),
            other => Err(Error::InvalidOption(format!("unknown output format: {}", other))),
        }
    }
}

/// Render a document in the given format.
pub fn render(doc: &Document, format: OutputFormat, json: JsonFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(doc, json),
        OutputFormat::Text => Ok(to_text(doc)),
        OutputFormat::Marked => Ok(to_marked_text(doc)),
    }
}
