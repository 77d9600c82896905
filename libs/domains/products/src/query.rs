//! Query building blocks for product listings: price ranges, sort order and
//! the search predicate.

use database::wildcard_pattern;
use serde::Deserialize;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::IntoParams;

use crate::error::{ProductError, ProductResult};

/// Largest integer a double represents exactly; upper bound of open ranges
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Named price bands accepted by `rangeId`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RangeToken {
    Range0,
    Range1,
    Range2,
    Range3,
    Range4,
    Range5,
}

impl RangeToken {
    pub fn bounds(self) -> PriceRange {
        let (low, high) = match self {
            RangeToken::Range0 => (0, MAX_SAFE_INTEGER),
            RangeToken::Range1 => (0, 99),
            RangeToken::Range2 => (100, 199),
            RangeToken::Range3 => (200, 399),
            RangeToken::Range4 => (400, 999),
            RangeToken::Range5 => (1000, MAX_SAFE_INTEGER),
        };
        PriceRange { low, high }
    }
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub low: i64,
    pub high: i64,
}

impl PriceRange {
    /// Every non-negative price
    pub const ANY: PriceRange = PriceRange {
        low: 0,
        high: MAX_SAFE_INTEGER,
    };

    /// Resolve a `rangeId` token. Absent or blank means [`PriceRange::ANY`].
    ///
    /// ```
    /// use domain_products::query::PriceRange;
    ///
    /// let range = PriceRange::from_token(Some("range3")).unwrap();
    /// assert_eq!((range.low, range.high), (200, 399));
    /// assert!(PriceRange::from_token(Some("range9")).is_err());
    /// ```
    pub fn from_token(token: Option<&str>) -> ProductResult<Self> {
        match token.map(str::trim) {
            None | Some("") => Ok(Self::ANY),
            Some(raw) => RangeToken::from_str(raw)
                .map(RangeToken::bounds)
                .map_err(|_| ProductError::InvalidRange(raw.to_string())),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.low as f64 && price <= self.high as f64
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::ANY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Value used in a MongoDB `$sort` stage
    pub fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

impl TryFrom<i64> for SortDirection {
    type Error = ProductError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SortDirection::Ascending),
            -1 => Ok(SortDirection::Descending),
            other => Err(ProductError::InvalidSortDirection(other)),
        }
    }
}

/// Field used when no sort field is given
pub const DEFAULT_SORT_FIELD: &str = "price";

/// Single-key sort. The field is not checked against the schema; an
/// unknown field leaves the store's natural order. Names the store would
/// reject as a field path are refused up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: Option<&str>, direction: Option<i64>) -> ProductResult<Self> {
        let field = match field.map(str::trim) {
            Some(name) if !name.is_empty() => {
                if !is_field_path(name) {
                    return Err(ProductError::InvalidSortField(name.to_string()));
                }
                name.to_string()
            }
            _ => DEFAULT_SORT_FIELD.to_string(),
        };
        let direction = direction
            .map(SortDirection::try_from)
            .transpose()?
            .unwrap_or_default();

        Ok(Self { field, direction })
    }
}

/// Dotted path whose segments are non-empty and not `$`-prefixed operators
fn is_field_path(name: &str) -> bool {
    !name.contains('\0')
        && name
            .split('.')
            .all(|segment| !segment.is_empty() && !segment.starts_with('$'))
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_string(),
            direction: SortDirection::Ascending,
        }
    }
}

/// Filter for listing: text search on name or description AND a price band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPredicate {
    /// Case-insensitive regex, already escaped and wildcard-wrapped
    pub pattern: String,
    pub price: PriceRange,
}

impl ProductPredicate {
    pub fn new(search: &str, price: PriceRange) -> Self {
        Self {
            pattern: wildcard_pattern(search),
            price,
        }
    }
}

/// Validated listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Page size, 0 for unlimited
    pub limit: u64,
    pub page: u64,
    pub search: String,
    pub range: PriceRange,
    pub sort: SortSpec,
}

impl QueryRequest {
    pub fn predicate(&self) -> ProductPredicate {
        ProductPredicate::new(&self.search, self.range)
    }
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            limit: 0,
            page: 1,
            search: String::new(),
            range: PriceRange::ANY,
            sort: SortSpec::default(),
        }
    }
}

/// Raw query string of `GET /products`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page size, 0 returns every match
    pub limit: Option<u64>,
    /// 1-based page, clamped to the last page
    pub page: Option<u64>,
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
    /// Price band: range0 (any), range1 (0-99), range2 (100-199),
    /// range3 (200-399), range4 (400-999), range5 (1000+)
    pub range_id: Option<String>,
    /// Field to sort by (default `price`)
    pub sort_name: Option<String>,
    /// 1 ascending, -1 descending
    pub sort_num: Option<i64>,
}

impl TryFrom<ListQuery> for QueryRequest {
    type Error = ProductError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            limit: query.limit.unwrap_or(0),
            page: query.page.unwrap_or(1),
            search: query.search.unwrap_or_default(),
            range: PriceRange::from_token(query.range_id.as_deref())?,
            sort: SortSpec::new(query.sort_name.as_deref(), query.sort_num)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_table() {
        let cases = [
            (None, 0, MAX_SAFE_INTEGER),
            (Some("range0"), 0, MAX_SAFE_INTEGER),
            (Some("range1"), 0, 99),
            (Some("range2"), 100, 199),
            (Some("range3"), 200, 399),
            (Some("range4"), 400, 999),
            (Some("range5"), 1000, MAX_SAFE_INTEGER),
        ];

        for (token, low, high) in cases {
            let range = PriceRange::from_token(token).unwrap();
            assert_eq!((range.low, range.high), (low, high), "token {:?}", token);
        }
    }

    #[test]
    fn test_unknown_range_is_validation_error() {
        let err = PriceRange::from_token(Some("range9")).unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err, ProductError::InvalidRange(t) if t == "range9"));

        assert!(PriceRange::from_token(Some("RANGE1")).is_err());
    }

    #[test]
    fn test_blank_range_means_any() {
        assert_eq!(PriceRange::from_token(Some("  ")).unwrap(), PriceRange::ANY);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = RangeToken::Range2.bounds();
        assert!(range.contains(100.0));
        assert!(range.contains(199.0));
        assert!(!range.contains(199.5));
        assert!(!range.contains(99.99));
    }

    #[test]
    fn test_sort_defaults_to_price_ascending() {
        let sort = SortSpec::new(None, None).unwrap();
        assert_eq!(sort, SortSpec::default());
        assert_eq!(sort.field, "price");
        assert_eq!(sort.direction.as_i32(), 1);
    }

    #[test]
    fn test_sort_passes_unknown_field_through() {
        let sort = SortSpec::new(Some("colour"), Some(-1)).unwrap();
        assert_eq!(sort.field, "colour");
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_sort_accepts_nested_field_path() {
        let sort = SortSpec::new(Some("dimensions.height"), None).unwrap();
        assert_eq!(sort.field, "dimensions.height");
    }

    #[test]
    fn test_sort_rejects_names_that_are_not_field_paths() {
        for bad in ["$where", "price.$size", "a..b", "price."] {
            let err = SortSpec::new(Some(bad), None).unwrap_err();
            assert!(matches!(err, ProductError::InvalidSortField(ref f) if f == bad));
            assert!(err.is_validation());
        }
    }

    #[test]
    fn test_sort_rejects_other_directions() {
        for bad in [0, 2, -2] {
            let err = SortSpec::new(None, Some(bad)).unwrap_err();
            assert!(matches!(err, ProductError::InvalidSortDirection(d) if d == bad));
        }
    }

    #[test]
    fn test_query_request_from_defaults() {
        let request = QueryRequest::try_from(ListQuery::default()).unwrap();
        assert_eq!(request, QueryRequest::default());
        assert_eq!(request.predicate().pattern, ".*.*");
    }

    #[test]
    fn test_query_request_from_camel_case_params() {
        let query: ListQuery = serde_json::from_value(serde_json::json!({
            "limit": 10,
            "page": 2,
            "search": "lamp",
            "rangeId": "range3",
            "sortName": "name",
            "sortNum": -1
        }))
        .unwrap();

        let request = QueryRequest::try_from(query).unwrap();
        assert_eq!(request.limit, 10);
        assert_eq!(request.page, 2);
        assert_eq!(request.range, RangeToken::Range3.bounds());
        assert_eq!(request.sort.field, "name");
        assert_eq!(request.sort.direction, SortDirection::Descending);
        assert_eq!(request.predicate().pattern, ".*lamp.*");
    }

    #[test]
    fn test_predicate_escapes_search_text() {
        let predicate = ProductPredicate::new("a+b (c)", PriceRange::ANY);
        assert_eq!(predicate.pattern, r".*a\+b \(c\).*");
    }
}
