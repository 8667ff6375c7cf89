//! Relative page links that preserve the caller's query parameters.

use url::form_urlencoded::Serializer;

use crate::number::PageNumber;

/// Query parameter carrying the page number.
pub const DEFAULT_PAGE_PARAM: &str = "page";

/// Builder for relative `?…&page=N` links.
///
/// Parameters with blank values are dropped so an empty search box does not
/// leak into pagination links.
///
/// # Examples
///
/// ```
/// use pagination::{PageLinks, PageNumber};
///
/// let links = PageLinks::new().with_param("username", "chef 1");
/// let second = PageNumber::new(2).expect("non-zero page");
/// assert_eq!(links.href(second), "?username=chef+1&page=2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    params: Vec<(String, String)>,
}

impl PageLinks {
    /// Start with no extra parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Carry `key=value` forward into every link.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.params.push((key.into(), value));
        }
        self
    }

    /// Render the link for `page`.
    #[must_use]
    pub fn href(&self, page: PageNumber) -> String {
        let mut serializer = Serializer::new(String::from("?"));
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.append_pair(DEFAULT_PAGE_PARAM, &page.to_string());
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for link rendering.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn renders_bare_page_link_without_params() {
        assert_eq!(PageLinks::new().href(PageNumber::FIRST), "?page=1");
    }

    #[rstest]
    fn drops_blank_values() {
        let links = PageLinks::new().with_param("name", "   ");
        assert_eq!(links.href(PageNumber::FIRST), "?page=1");
    }

    #[rstest]
    fn escapes_reserved_characters() {
        let links = PageLinks::new().with_param("name", "a&b=c");
        assert_eq!(links.href(PageNumber::FIRST), "?name=a%26b%3Dc&page=1");
    }
}
