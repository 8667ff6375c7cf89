//! Page arithmetic: total pages, clamping, and offset windows.

use crate::number::{PageNumber, PageSize};

/// Offset and limit for loading one page of items from a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u64,
}

impl PageWindow {
    /// Number of items to skip.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Maximum number of items to load.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.limit
    }
}

/// Resolved page position for a collection of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    number: PageNumber,
    total_pages: u64,
    total_items: u64,
    window: PageWindow,
}

impl PagePlan {
    /// Page actually served after clamping.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// Number of pages; at least one.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Window to load for this page.
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        self.window
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number.get() < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number.get() > 1
    }
}

/// Fixed-size page calculator.
///
/// # Examples
///
/// ```
/// use pagination::{PageNumber, PageSize, Paginator};
///
/// let paginator = Paginator::new(PageSize::clamped(10));
/// let empty = paginator.plan(0, PageNumber::FIRST);
/// assert_eq!(empty.total_pages(), 1);
/// assert_eq!(empty.window().limit(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: PageSize,
}

impl Paginator {
    /// Create a paginator serving `page_size` items per page.
    #[must_use]
    pub const fn new(page_size: PageSize) -> Self {
        Self { page_size }
    }

    /// Configured page size.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Plan the page to serve for `requested` over `total_items` items.
    ///
    /// Requests past the last page are clamped to the last page.
    #[must_use]
    pub fn plan(&self, total_items: u64, requested: PageNumber) -> PagePlan {
        let size = self.page_size.get();
        let total_pages = total_items.div_ceil(size).max(1);
        let number = if requested.get() > total_pages {
            PageNumber::new(total_pages).unwrap_or(PageNumber::FIRST)
        } else {
            requested
        };
        let offset = number.get().saturating_sub(1).saturating_mul(size);

        PagePlan {
            number,
            total_pages,
            total_items,
            window: PageWindow {
                offset,
                limit: size,
            },
        }
    }
}
