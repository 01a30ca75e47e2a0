//! Query-string and path extractors
//!
//! List endpoints never reject their query string: every parameter is read
//! as text and coerced the same way `PaginationQuery::from_raw` coerces
//! `page` and `limit`.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use axum::http::Uri;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use utoipa::IntoParams;

use super::api_error::ApiError;
use crate::domain::{ListQuery, SortOrder};
use crate::shared::PaginationQuery;

/// Query parameters accepted by every list endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct RawListQuery {
    /// Page number (1-based). Defaults to 1, values below 1 become 1
    pub page: Option<String>,
    /// Page size. Defaults to 10, clamped to 1..=100
    pub limit: Option<String>,
    /// Case-insensitive substring match over the resource's text fields
    pub search: Option<String>,
    /// Field to sort by; unknown fields fall back to newest first
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    pub sort_order: Option<String>,
}

impl From<RawListQuery> for ListQuery {
    fn from(raw: RawListQuery) -> Self {
        ListQuery {
            pagination: PaginationQuery::from_raw(raw.page.as_deref(), raw.limit.as_deref()),
            search: raw.search,
            sort_by: raw.sort_by,
            sort_order: raw.sort_order.as_deref().and_then(SortOrder::parse),
        }
    }
}

/// Decoded `key=value` pairs. A query string that cannot be decoded at all
/// is treated as empty.
fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default()
}

/// First value for `key`; repeated keys keep the first occurrence.
fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// `page` / `limit` only, for endpoints that paginate without filtering.
#[derive(Debug, Clone, Copy)]
pub struct Pagination(pub PaginationQuery);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(&parts.uri);
        let page = first(&pairs, "page");
        let limit = first(&pairs, "limit");
        Ok(Pagination(PaginationQuery::from_raw(
            page.as_deref(),
            limit.as_deref(),
        )))
    }
}

/// Full list query: pagination, search and sort.
#[derive(Debug, Clone)]
pub struct ListParams(pub ListQuery);

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(&parts.uri);
        let raw = RawListQuery {
            page: first(&pairs, "page"),
            limit: first(&pairs, "limit"),
            search: first(&pairs, "search"),
            sort_by: first(&pairs, "sortBy"),
            sort_order: first(&pairs, "sortOrder"),
        };
        Ok(ListParams(raw.into()))
    }
}

/// `axum::extract::Path` whose rejection is an error envelope.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| ApiPath(value))
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use super::*;

    async fn pagination_handler(Pagination(q): Pagination) -> String {
        format!("{}/{}", q.page(), q.limit())
    }

    async fn list_handler(ListParams(q): ListParams) -> String {
        format!(
            "{}/{}/{}/{}/{:?}",
            q.pagination.page(),
            q.pagination.limit(),
            q.search.unwrap_or_default(),
            q.sort_by.unwrap_or_default(),
            q.sort_order
        )
    }

    async fn path_handler(ApiPath(id): ApiPath<u32>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/p", get(pagination_handler))
            .route("/l", get(list_handler))
            .route("/n/{id}", get(path_handler))
    }

    async fn get_text(uri: &str) -> (StatusCode, String) {
        let resp = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn pagination_never_rejects() {
        assert_eq!(get_text("/p").await, (StatusCode::OK, "1/10".into()));
        assert_eq!(get_text("/p?page=abc&limit=999").await, (StatusCode::OK, "1/100".into()));
        assert_eq!(get_text("/p?page=3&limit=0").await, (StatusCode::OK, "3/1".into()));
        assert_eq!(get_text("/p?page=2&page=9").await, (StatusCode::OK, "2/10".into()));
        assert_eq!(get_text("/p?%%%").await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn list_params_read_search_and_sort() {
        let (status, body) =
            get_text("/l?page=2&limit=5&search=steel&sortBy=name&sortOrder=DESC").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "2/5/steel/name/Some(Desc)");

        let (_, body) = get_text("/l?sortOrder=sideways").await;
        assert_eq!(body, "1/10///None");
    }

    #[tokio::test]
    async fn bad_path_is_an_envelope() {
        let (status, body) = get_text("/n/not-a-number").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}
