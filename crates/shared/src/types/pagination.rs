//! Row ranges for paginated reads.
//!
//! The store paginates with an inclusive `Range: from-to` header, so pages
//! are converted to zero-based inclusive row ranges.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of rows per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Calculates the zero-based row offset.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Returns the row limit.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// Returns the inclusive row range covered by this page.
    ///
    /// Returns `None` for an empty page size.
    #[must_use]
    pub fn row_range(&self) -> Option<RowRange> {
        if self.per_page == 0 {
            return None;
        }
        let from = self.offset();
        Some(RowRange::new(from, from + self.limit() - 1))
    }
}

/// Zero-based inclusive row range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    /// First row index.
    pub from: u64,
    /// Last row index (inclusive).
    pub to: u64,
}

impl RowRange {
    /// Creates a range, swapping the bounds if given in reverse.
    #[must_use]
    pub const fn new(from: u64, to: u64) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// Number of rows in the range.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.to - self.from + 1
    }

    /// Always false; a range holds at least one row.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Value of the `Range` header, e.g. `0-19`.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}
