//! Client-side pagination state and page window math.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Numeric encoding of [`RowsPerPage::All`] in configuration files.
pub const ALL_SENTINEL: i64 = -1;

/// Rows shown per page before the user picks another size.
pub const DEFAULT_ROWS_PER_PAGE: RowsPerPage = RowsPerPage::Limited(5);

/// Page size options offered when the configuration does not list any.
pub fn default_rows_per_page_options() -> Vec<RowsPerPage> {
    vec![
        RowsPerPage::Limited(5),
        RowsPerPage::Limited(10),
        RowsPerPage::Limited(25),
        RowsPerPage::All,
    ]
}

/// Page size setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RowsPerPage {
    /// At most this many rows per page. Never zero.
    Limited(usize),

    /// No windowing: every record on a single page.
    All,
}

impl TryFrom<i64> for RowsPerPage {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            ALL_SENTINEL => Ok(Self::All),
            n if n > 0 => Ok(Self::Limited(n as usize)),
            n => Err(format!(
                "rows per page must be positive or {} for all, got {}",
                ALL_SENTINEL, n
            )),
        }
    }
}

impl From<RowsPerPage> for i64 {
    fn from(value: RowsPerPage) -> Self {
        match value {
            RowsPerPage::Limited(n) => n as i64,
            RowsPerPage::All => ALL_SENTINEL,
        }
    }
}

impl FromStr for RowsPerPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let n: i64 = s
            .parse()
            .map_err(|_| format!("expected a positive number or 'all', got '{}'", s))?;
        Self::try_from(n)
    }
}

impl fmt::Display for RowsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{}", n),
            Self::All => f.write_str("All"),
        }
    }
}

/// Pagination state owned by a view: a zero-based page and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: usize,
    rows_per_page: RowsPerPage,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

impl Pagination {
    /// Start on the first page with the given size.
    pub fn new(rows_per_page: RowsPerPage) -> Self {
        Self {
            page: 0,
            rows_per_page,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> RowsPerPage {
        self.rows_per_page
    }

    /// Assign the page index. Bounds are the caller's concern.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Assign the page size and go back to the first page, so a smaller
    /// page count never leaves the index out of range.
    pub fn set_rows_per_page(&mut self, rows_per_page: RowsPerPage) {
        self.rows_per_page = rows_per_page;
        self.page = 0;
    }

    /// Number of pages for `total` records. Always at least one.
    pub fn page_count(&self, total: usize) -> usize {
        match self.rows_per_page {
            RowsPerPage::All => 1,
            RowsPerPage::Limited(n) => total.div_ceil(n.max(1)).max(1),
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 0
    }

    pub fn is_last_page(&self, total: usize) -> bool {
        self.page + 1 >= self.page_count(total)
    }

    /// Index range of the current window, clamped to `total`.
    ///
    /// A page that starts past the end yields an empty range.
    pub fn window_range(&self, total: usize) -> Range<usize> {
        match self.rows_per_page {
            RowsPerPage::All => 0..total,
            RowsPerPage::Limited(n) => {
                let n = n.max(1);
                let start = self.page.saturating_mul(n).min(total);
                let end = start.saturating_add(n).min(total);
                start..end
            }
        }
    }

    /// The records visible on the current page.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.window_range(items.len())]
    }

    /// Human label for the visible rows, e.g. `6-10 of 12`.
    pub fn displayed_rows_label(&self, total: usize) -> String {
        let range = self.window_range(total);
        if range.is_empty() {
            format!("0-0 of {}", total)
        } else {
            format!("{}-{} of {}", range.start + 1, range.end, total)
        }
    }
}
