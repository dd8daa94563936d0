//! Pagination contract for list operations
//!
//! Raw `page` / `page_size` query values are normalised into a
//! [`PageRequest`], and any ordered result set can be wrapped in a
//! [`Paginated`] envelope carrying the derived page metadata.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::{PageRequest, Paginated};
//!
//! let request = PageRequest::parse(Some("2"), Some("abc"));
//! assert_eq!(request.page(), 2);
//! assert_eq!(request.page_size(), 10);
//!
//! let page = Paginated::new(vec!["a", "b"], request, 12);
//! assert_eq!(page.pagination.total_pages, 2);
//! assert!(!page.pagination.has_next);
//! ```

use serde::{Deserialize, Serialize};

/// Page used when none (or an invalid one) is supplied
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when none (or an invalid one) is supplied
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size honoured; larger requests are clamped to it
pub const MAX_PAGE_SIZE: u32 = 1000;

/// A validated page request. Both values are always at least 1 and the
/// page size never exceeds [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Builds a request, falling back to the defaults for zero values
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size.min(MAX_PAGE_SIZE)
            },
        }
    }

    /// Normalises raw query parameter values.
    ///
    /// Absent, non-numeric and non-positive inputs each fall back to their
    /// default independently of the other parameter.
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            page_size: parse_positive(page_size)
                .map(|size| size.min(MAX_PAGE_SIZE))
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip: `(page - 1) * page_size`, saturating at
    /// `i64::MAX`
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).saturating_mul(i64::from(self.page_size))
    }

    /// Maximum number of rows to return
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value > 0)
        .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
}

/// Page metadata derived from the total item count and the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationMeta {
    /// Derives the metadata for `request` over `total_items` rows
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(u64::from(request.page_size));
        Self {
            current_page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
            has_next: u64::from(request.page) < total_pages,
            has_previous: request.page > 1,
        }
    }
}

/// A page of results plus its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(request, total_items),
        }
    }

    /// Converts every item, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
