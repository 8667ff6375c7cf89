//! Search and paging helpers shared by the list queries.

use pagination::PageWindow;

use crate::domain::SearchFilter;

/// `ILIKE` pattern for a filter, with LIKE wildcards in the text escaped so
/// user input only ever matches literally.
///
/// # Examples
/// ```ignore
/// let filter = SearchFilter::new(Some("50%_off"));
/// assert_eq!(ilike_pattern(&filter).as_deref(), Some("%50\\%\\_off%"));
/// ```
pub(crate) fn ilike_pattern(filter: &SearchFilter) -> Option<String> {
    filter.text().map(|text| {
        let mut pattern = String::with_capacity(text.len() + 2);
        pattern.push('%');
        for ch in text.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    })
}

/// `(offset, limit)` for SQL, saturating at `i64::MAX`.
pub(crate) fn sql_window(window: PageWindow) -> (i64, i64) {
    let offset = i64::try_from(window.offset()).unwrap_or(i64::MAX);
    let limit = i64::try_from(window.limit()).unwrap_or(i64::MAX);
    (offset, limit)
}

/// Row count from `COUNT(*)`, which is never negative.
pub(crate) fn row_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use pagination::{PageNumber, PageSize, Paginator};
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some("soup"), Some("%soup%"))]
    #[case(Some("50%_off"), Some("%50\\%\\_off%"))]
    #[case(Some("a\\b"), Some("%a\\\\b%"))]
    fn patterns_escape_wildcards(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(ilike_pattern(&SearchFilter::new(raw)).as_deref(), expected);
    }

    #[rstest]
    fn windows_convert_to_sql_offsets() {
        let requested = PageNumber::new(3).expect("positive page");
        let window = Paginator::new(PageSize::clamped(10))
            .plan(45, requested)
            .window();
        assert_eq!(sql_window(window), (20, 10));
    }
}
