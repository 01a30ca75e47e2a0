//! Filtering and ordering for collection queries

use crate::shared::PaginationQuery;

/// Sort direction requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive `asc` / `desc`; anything else is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Everything a repository needs to produce one page of a collection.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ListQuery {
    pub fn new(pagination: PaginationQuery) -> Self {
        Self {
            pagination,
            ..Default::default()
        }
    }

    /// Trimmed search term, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Requested sort field, `None` when blank.
    pub fn sort_field(&self) -> Option<&str> {
        self.sort_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Direction for an explicit sort field; ascending unless asked otherwise.
    pub fn direction(&self) -> SortOrder {
        self.sort_order.unwrap_or(SortOrder::Asc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_parsing_is_lenient() {
        assert_eq!(SortOrder::parse("ASC"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse(" desc "), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("sideways"), None);
    }

    #[test]
    fn blank_search_is_ignored() {
        let mut query = ListQuery::default();
        query.search = Some("   ".into());
        assert_eq!(query.search_term(), None);

        query.search = Some("  bolt ".into());
        assert_eq!(query.search_term(), Some("bolt"));
    }

    #[test]
    fn explicit_sort_defaults_to_ascending() {
        let mut query = ListQuery::default();
        query.sort_by = Some("name".into());
        assert_eq!(query.sort_field(), Some("name"));
        assert_eq!(query.direction(), SortOrder::Asc);
    }
}
