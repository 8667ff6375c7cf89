//! Page-number pagination primitives shared by list endpoints.
//!
//! The crate splits pagination into three steps:
//!
//! - [`PageNumber`] parses the caller's `page` parameter. Lenient parsing maps
//!   missing, zero, negative, or non-numeric input to the first page.
//! - [`Paginator`] turns a total item count and a requested page into a
//!   [`PagePlan`], clamping requests beyond the last page onto the last page.
//!   An empty collection still has exactly one (empty) page.
//! - [`Page`] wraps the loaded items together with [`PageMeta`], including
//!   relative `next`/`previous` links produced by [`PageLinks`] that carry
//!   the caller's other query parameters forward.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageLinks, PageNumber, PageSize, Paginator, Page};
//!
//! let paginator = Paginator::new(PageSize::clamped(10));
//! let plan = paginator.plan(25, PageNumber::from_query(Some("7")));
//! assert_eq!(plan.number().get(), 3);
//! assert_eq!(plan.window().offset(), 20);
//!
//! let links = PageLinks::new().with_param("name", "soup");
//! let page = Page::new(&plan, vec!["a", "b", "c", "d", "e"], &links);
//! assert_eq!(page.meta().previous(), Some("?name=soup&page=2"));
//! assert!(page.meta().next().is_none());
//! ```

mod links;
mod number;
mod page;
mod paginator;

pub use links::{DEFAULT_PAGE_PARAM, PageLinks};
pub use number::{PageNumber, PageNumberError, PageSize};
pub use page::{Page, PageMeta};
pub use paginator::{PagePlan, PageWindow, Paginator};
