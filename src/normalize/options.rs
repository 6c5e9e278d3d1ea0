//! Normalization options and configuration.

use crate::error::{Error, Result};

use super::table::TableFlaggerConfig;

/// Options for normalizing a loaded document.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Non-blank lines taken from the top of each page as header candidates
    pub top_n: usize,

    /// Non-blank lines taken from the bottom of each page as footer candidates
    pub bottom_n: usize,

    /// Fraction of pages a candidate must appear on to count as boilerplate
    pub threshold: f64,

    /// Remove table-like pages from the result
    pub drop_table_like_pages: bool,

    /// Process pages in parallel
    pub parallel: bool,

    /// Table-likeness heuristic settings
    pub table: TableFlaggerConfig,
}

impl NormalizeOptions {
    /// Create new normalize options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of header candidate lines per page.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the number of footer candidate lines per page.
    pub fn with_bottom_n(mut self, bottom_n: usize) -> Self {
        self.bottom_n = bottom_n;
        self
    }

    /// Set the boilerplate frequency threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable dropping of table-like pages.
    pub fn with_drop_table_like_pages(mut self, drop: bool) -> Self {
        self.drop_table_like_pages = drop;
        self
    }

    /// Drop table-like pages from the result.
    pub fn drop_table_like_pages(mut self) -> Self {
        self.drop_table_like_pages = true;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the table-likeness heuristic.
    pub fn with_table_config(mut self, table: TableFlaggerConfig) -> Self {
        self.table = table;
        self
    }

    /// Check that option values are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(Error::InvalidOption(format!(
                "threshold must be in (0, 1], got {}",
                self.threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.table.max_short_ratio) {
            return Err(Error::InvalidOption(format!(
                "max_short_ratio must be in [0, 1], got {}",
                self.table.max_short_ratio
            )));
        }
        Ok(())
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            top_n: 2,
            bottom_n: 2,
            threshold: 0.6,
            drop_table_like_pages: false,
            parallel: true,
            table: TableFlaggerConfig::default(),
        }
    }
}
