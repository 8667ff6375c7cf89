//! Serialisable page envelope.

use serde::Serialize;

use crate::links::PageLinks;
use crate::paginator::PagePlan;

/// Navigation metadata for one served page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    number: u64,
    total_pages: u64,
    total_items: u64,
    has_next: bool,
    has_previous: bool,
    next: Option<String>,
    previous: Option<String>,
}

impl PageMeta {
    /// Page number actually served.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Number of pages; at least one.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Number of matching items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.has_previous
    }

    /// Relative link to the next page.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Relative link to the previous page.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }
}

/// Items loaded for one page plus their navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    #[serde(rename = "page")]
    meta: PageMeta,
}

impl<T> Page<T> {
    /// Assemble a page from its plan and the items loaded for its window.
    #[must_use]
    pub fn new(plan: &PagePlan, items: Vec<T>, links: &PageLinks) -> Self {
        let number = plan.number();
        let next = plan.has_next().then(|| links.href(number.next()));
        let previous = number.previous().map(|page| links.href(page));
        Self {
            items,
            meta: PageMeta {
                number: number.get(),
                total_pages: plan.total_pages(),
                total_items: plan.total_items(),
                has_next: plan.has_next(),
                has_previous: plan.has_previous(),
                next,
                previous,
            },
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Navigation metadata.
    #[must_use]
    pub const fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Convert every item while keeping the metadata.
    #[must_use]
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the page envelope.
    use super::*;
    use crate::number::{PageNumber, PageSize};
    use crate::paginator::Paginator;
    use rstest::rstest;
    use serde_json::json;

    fn plan(total: u64, requested: u64) -> PagePlan {
        Paginator::new(PageSize::clamped(10))
            .plan(total, PageNumber::new(requested).expect("non-zero page"))
    }

    #[rstest]
    fn serialises_with_camel_case_meta() {
        let links = PageLinks::new().with_param("username", "ann");
        let page = Page::new(&plan(15, 1), vec![1, 2], &links);
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(
            value,
            json!({
                "items": [1, 2],
                "page": {
                    "number": 1,
                    "totalPages": 2,
                    "totalItems": 15,
                    "hasNext": true,
                    "hasPrevious": false,
                    "next": "?username=ann&page=2",
                    "previous": null
                }
            })
        );
    }

    #[rstest]
    fn empty_collection_has_single_page_without_links() {
        let page: Page<u8> = Page::new(&plan(0, 1), Vec::new(), &PageLinks::new());
        assert_eq!(page.meta().total_pages(), 1);
        assert!(page.items().is_empty());
        assert!(page.meta().next().is_none());
        assert!(page.meta().previous().is_none());
    }

    #[rstest]
    fn map_items_preserves_meta() {
        let page = Page::new(&plan(12, 2), vec![3_u8, 4], &PageLinks::new());
        let mapped = page.clone().map_items(|value| value.to_string());
        assert_eq!(mapped.meta(), page.meta());
        assert_eq!(mapped.into_items(), vec!["3".to_owned(), "4".to_owned()]);
    }
}
