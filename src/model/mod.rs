//! Document model types.
//!
//! A [`Document`] is the unit handed from loading to normalization and on to
//! downstream indexing. Every stage builds a new `Document` instead of
//! editing one in place.

mod document;
mod page;

pub use document::{join_pages, Document, FileType, SourceQuality, PAGE_SEPARATOR};
pub use page::Page;
