//! JSON rendering for documents and reports.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::normalize::NormalizeReport;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Convert a normalization report to JSON.
pub fn report_to_json(report: &NormalizeReport, format: JsonFormat) -> Result<String> {
    serialize(report, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
}
