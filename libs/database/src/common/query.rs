//! Page arithmetic and text matching shared by list endpoints.

use serde::Serialize;

/// Page window derived from a match count, a page size and a requested page.
///
/// A `limit` of zero means "no page size": everything matches on a single
/// page and `skip` stays zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Number of pages, never below one
    pub total_pages: u64,
    /// Requested page clamped into `1..=total_pages`
    pub current_page: u64,
    /// Records to bypass before the page starts
    pub skip: u64,
    /// Page size, zero for unlimited
    pub limit: u64,
}

impl Pagination {
    /// Compute the window for `match_count` records.
    ///
    /// A request past the last page is clamped to the last page rather than
    /// rejected. Page `0` is treated as page `1`.
    pub fn compute(match_count: u64, limit: u64, requested_page: u64) -> Self {
        let total_pages = if limit > 0 {
            match_count.div_ceil(limit)
        } else {
            1
        }
        .max(1);

        let current_page = requested_page.clamp(1, total_pages);
        let skip = (current_page - 1) * limit;

        Self {
            total_pages,
            current_page,
            skip,
            limit,
        }
    }

    /// Whether every matching record belongs to the single page.
    pub fn is_unlimited(&self) -> bool {
        self.limit == 0
    }
}

/// Wrap user text into a "contains" regular expression.
///
/// Regex metacharacters in `search` are escaped so the text matches
/// literally. Empty text yields a pattern that matches everything.
pub fn wildcard_pattern(search: &str) -> String {
    format!(".*{}.*", regex::escape(search))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    fn matches(pattern: &str, haystack: &str) -> bool {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap()
            .is_match(haystack)
    }

    #[test]
    fn test_pagination_clamps_past_last_page() {
        let page = Pagination::compute(25, 10, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.skip, 20);
    }

    #[test]
    fn test_pagination_unlimited_is_single_page() {
        for count in [0, 1, 10_000] {
            let page = Pagination::compute(count, 0, 4);
            assert_eq!(page.total_pages, 1);
            assert_eq!(page.current_page, 1);
            assert_eq!(page.skip, 0);
            assert!(page.is_unlimited());
        }
    }

    #[test]
    fn test_pagination_no_matches_still_has_one_page() {
        let page = Pagination::compute(0, 10, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.skip, 0);
    }

    #[test]
    fn test_pagination_exact_multiple() {
        let page = Pagination::compute(30, 10, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.skip, 10);
    }

    #[test]
    fn test_pagination_page_zero_is_first_page() {
        let page = Pagination::compute(30, 10, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.skip, 0);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let pattern = wildcard_pattern("");
        assert_eq!(pattern, ".*.*");
        assert!(matches(&pattern, ""));
        assert!(matches(&pattern, "Anything at all"));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let pattern = wildcard_pattern("lamp");
        assert!(matches(&pattern, "Desk LAMP with shade"));
        assert!(!matches(&pattern, "Desk light"));
    }

    #[test]
    fn test_search_escapes_metacharacters() {
        let pattern = wildcard_pattern("c++ (2nd ed.)");
        assert!(matches(&pattern, "Learning C++ (2nd ed.) paperback"));
        assert!(!matches(&pattern, "Learning c (2nd edX)"));
    }

    mod properties {
        use super::super::Pagination;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn current_page_never_exceeds_total(
                count in 0u64..1_000_000,
                limit in 0u64..500,
                page in 1u64..10_000,
            ) {
                let p = Pagination::compute(count, limit, page);
                prop_assert!(p.total_pages >= 1);
                prop_assert!(p.current_page >= 1);
                prop_assert!(p.current_page <= p.total_pages);
                prop_assert_eq!(p.skip, (p.current_page - 1) * limit);
            }

            #[test]
            fn unlimited_always_single_page(count in 0u64..1_000_000, page in 1u64..10_000) {
                prop_assert_eq!(Pagination::compute(count, 0, page).total_pages, 1);
            }
        }
    }
}
