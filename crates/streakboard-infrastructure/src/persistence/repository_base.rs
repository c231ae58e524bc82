use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::sync::Arc;

use streakboard_domain::shared::DomainError;

type SqliteArgs<'q> = <Sqlite as sqlx::Database>::Arguments<'q>;

/// Shared pool handle plus error mapping for the SQLite repositories.
///
/// Every failure becomes `DomainError::Repository` prefixed with the
/// operation label passed by the caller.
#[derive(Clone)]
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArgs<'q>>,
        operation: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        query
            .execute(self.pool())
            .await
            .map_err(|e| Self::map_err(operation, e))
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArgs<'q>>,
        operation: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_optional(self.pool())
            .await
            .map_err(|e| Self::map_err(operation, e))
    }

    pub async fn fetch_one<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArgs<'q>>,
        operation: &str,
    ) -> Result<T, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_one(self.pool())
            .await
            .map_err(|e| Self::map_err(operation, e))
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArgs<'q>>,
        operation: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_all(self.pool())
            .await
            .map_err(|e| Self::map_err(operation, e))
    }

    pub fn map_err(operation: &str, e: sqlx::Error) -> DomainError {
        DomainError::Repository(format!("{}: {}", operation, e))
    }
}
