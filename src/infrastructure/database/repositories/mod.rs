//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod location_repository;
pub mod material_repository;
pub mod repository_provider;
pub mod role_repository;
pub mod unit_of_measure_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::sea_query::{LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, DbErr, QueryOrder, SqlErr};

use crate::domain::SortOrder;
use crate::shared::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Map insert/update failures, turning constraint violations into conflicts.
pub(crate) fn write_err(entity: &'static str, e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict(format!("{} with the same unique key already exists", entity))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            DomainError::Conflict(format!("{} is referenced by other records", entity))
        }
        _ => db_err(e),
    }
}

pub(crate) fn order_by<Q, C>(query: Q, column: C, order: SortOrder) -> Q
where
    Q: QueryOrder,
    C: ColumnTrait,
{
    match order {
        SortOrder::Asc => query.order_by_asc(column),
        SortOrder::Desc => query.order_by_desc(column),
    }
}

const LIKE_ESCAPE: char = '\\';

/// Substring match where `%` and `_` in `term` are literal characters.
pub(crate) fn contains_term<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    column.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}
