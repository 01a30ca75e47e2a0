//! Offset/limit pagination shared by every list endpoint.
//!
//! Raw `page` / `limit` values arrive as optional query-string text.
//! They are coerced leniently: anything that is not an integer falls back
//! to the default, and integers outside the allowed range snap to the
//! nearest bound. A [`PaginationQuery`] therefore always holds
//! `1 <= page <= MAX_PAGE` and `1 <= limit <= MAX_LIMIT`, which is what lets
//! [`compute_meta`] divide by `limit` without re-checking it and keeps
//! [`PaginationQuery::offset`] within the signed 64-bit range SQL binds use.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::envelope::Envelope;

/// Page used when the client sends none (or garbage).
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the client sends none (or garbage).
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page size a client may request.
pub const MAX_LIMIT: u64 = 100;
/// Largest page whose offset still fits an `i64` at any allowed page size.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_LIMIT;

/// Pagination parameters exactly as they appear in the query string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RawPaginationQuery {
    /// Page number (1-based). Defaults to 1, clamped to 1..=MAX_PAGE
    pub page: Option<String>,
    /// Page size. Defaults to 10, clamped to 1..=100
    pub limit: Option<String>,
}

/// Validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationQuery {
    page: u64,
    limit: u64,
}

impl PaginationQuery {
    /// Clamp already-numeric values into the allowed window.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Coerce raw query-string values. Never fails.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = coerce_int(page).map_or(DEFAULT_PAGE, |p| {
            (p.max(1) as u64).min(MAX_PAGE)
        });
        let limit = coerce_int(limit).map_or(DEFAULT_LIMIT, |l| {
            l.clamp(1, MAX_LIMIT as i64) as u64
        });

        Self { page, limit }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<RawPaginationQuery> for PaginationQuery {
    fn from(raw: RawPaginationQuery) -> Self {
        Self::from_raw(raw.page.as_deref(), raw.limit.as_deref())
    }
}

fn coerce_int(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok()
}

/// Metadata attached to every paginated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of rows matching the query (all pages)
    pub total: u64,
    /// Current page (1-based)
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// `ceil(total / limit)`; 0 when there are no rows
    pub total_pages: u64,
}

/// Derive page metadata for a validated query and a row count.
pub fn compute_meta(query: PaginationQuery, total: u64) -> PaginationMeta {
    PaginationMeta {
        total,
        page: query.page,
        limit: query.limit,
        total_pages: total.div_ceil(query.limit),
    }
}

/// One window of rows plus the unpaginated row count, as returned by the
/// data-access layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(rows: Vec<T>, total: u64) -> Self {
        Self { rows, total }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            total: self.total,
        }
    }

    /// Compute metadata for `query` and wrap the rows in a paginated envelope.
    pub fn into_envelope(self, query: PaginationQuery) -> Envelope<T> {
        let meta = compute_meta(query, self.total);
        Envelope::paginated(self.rows, meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let q = PaginationQuery::from_raw(None, None);
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);
        assert_eq!(q, PaginationQuery::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let q = PaginationQuery::from_raw(Some("0"), Some("500"));
        assert_eq!((q.page(), q.limit()), (1, 100));

        let q = PaginationQuery::from_raw(Some("-7"), Some("0"));
        assert_eq!((q.page(), q.limit()), (1, 1));

        let q = PaginationQuery::from_raw(Some("3"), Some("-20"));
        assert_eq!((q.page(), q.limit()), (3, 1));
    }

    #[test]
    fn non_integer_values_fall_back_to_defaults() {
        for junk in ["abc", "", "  ", "2.5", "1e3", "99999999999999999999999"] {
            let q = PaginationQuery::from_raw(Some(junk), Some(junk));
            assert_eq!((q.page(), q.limit()), (1, 10), "input {junk:?}");
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let q = PaginationQuery::from_raw(Some(" 4 "), Some("\t25"));
        assert_eq!((q.page(), q.limit()), (4, 25));
    }

    #[test]
    fn new_clamps_like_from_raw() {
        assert_eq!(PaginationQuery::new(0, 0), PaginationQuery::from_raw(Some("0"), Some("0")));
        assert_eq!(PaginationQuery::new(2, 1000).limit(), 100);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PaginationQuery::new(1, 10).offset(), 0);
        assert_eq!(PaginationQuery::new(2, 10).offset(), 10);
        assert_eq!(PaginationQuery::new(5, 25).offset(), 100);

        let last = PaginationQuery::new(u64::MAX, MAX_LIMIT);
        assert_eq!(last.page(), MAX_PAGE);
        assert!(last.offset() <= i64::MAX as u64);
    }

    #[test]
    fn huge_pages_are_capped() {
        let q = PaginationQuery::from_raw(Some("9223372036854775807"), Some("100"));
        assert_eq!(q.page(), MAX_PAGE);
        assert!(i64::try_from(q.offset()).is_ok());

        let q = PaginationQuery::from_raw(Some(&MAX_PAGE.to_string()), Some("1"));
        assert_eq!(q.page(), MAX_PAGE);
    }

    #[test]
    fn meta_for_empty_result() {
        let meta = compute_meta(PaginationQuery::new(1, 10), 0);
        assert_eq!(
            meta,
            PaginationMeta {
                total: 0,
                page: 1,
                limit: 10,
                total_pages: 0,
            }
        );
    }

    #[test]
    fn meta_rounds_partial_pages_up() {
        let meta = compute_meta(PaginationQuery::new(2, 10), 25);
        assert_eq!(
            meta,
            PaginationMeta {
                total: 25,
                page: 2,
                limit: 10,
                total_pages: 3,
            }
        );
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        for limit in 1..=MAX_LIMIT {
            for total in [0, 1, limit - 1, limit, limit + 1, 3 * limit, 1_000] {
                let meta = compute_meta(PaginationQuery::new(1, limit), total);
                let expected = (total as f64 / limit as f64).ceil() as u64;
                assert_eq!(meta.total_pages, expected, "total={total} limit={limit}");
            }
        }
    }

    #[test]
    fn meta_serializes_camel_case() {
        let meta = compute_meta(PaginationQuery::new(2, 10), 25);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"total": 25, "page": 2, "limit": 10, "totalPages": 3})
        );
    }

    #[test]
    fn raw_query_converts_leniently() {
        let raw = RawPaginationQuery {
            page: Some("2".into()),
            limit: Some("lots".into()),
        };
        let q = PaginationQuery::from(raw);
        assert_eq!((q.page(), q.limit()), (2, 10));
    }

    #[test]
    fn page_map_keeps_total() {
        let page = Page::new(vec![1, 2, 3], 42).map(|n| n * 10);
        assert_eq!(page.rows, vec![10, 20, 30]);
        assert_eq!(page.total, 42);
    }
}
