use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::{from_sql_int, to_sql_int};
use crate::persistence::SqliteRepositoryBase;
use streakboard_domain::shared::{DomainError, UserId};
use streakboard_domain::user::{User, UserRepository};

#[derive(FromRow)]
struct UserRow {
    id: String,
    rolling_total: i64,
    historical_total: i64,
    current_streak: i64,
    longest_streak: i64,
    timezone: String,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, DomainError> {
        Ok(User::restore(
            UserId::from_string(&self.id),
            from_sql_int(self.rolling_total, "rolling_total")?,
            from_sql_int(self.historical_total, "historical_total")?,
            from_sql_int(self.current_streak, "current_streak")?,
            from_sql_int(self.longest_streak, "longest_streak")?,
            self.timezone,
        ))
    }
}

pub struct SqliteUserRepository {
    base: SqliteRepositoryBase,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let query = r#"
            SELECT
                id,
                rolling_total,
                historical_total,
                current_streak,
                longest_streak,
                timezone
            FROM users
            ORDER BY id ASC
        "#;

        let rows: Vec<UserRow> = self
            .base
            .fetch_all(sqlx::query_as(query), "List users")
            .await?;

        rows.into_iter().map(|r| r.try_into_user()).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT
                id,
                rolling_total,
                historical_total,
                current_streak,
                longest_streak,
                timezone
            FROM users
            WHERE id = ?1
        "#;

        let row: Option<UserRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(id.as_str()), "Find user by ID")
            .await?;

        row.map(|r| r.try_into_user()).transpose()
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO users (
                id,
                rolling_total,
                historical_total,
                current_streak,
                longest_streak,
                timezone
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id) DO UPDATE SET
                rolling_total = excluded.rolling_total,
                historical_total = excluded.historical_total,
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak,
                timezone = excluded.timezone
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(user.id().as_str())
                    .bind(to_sql_int(user.rolling_total(), "rolling_total")?)
                    .bind(to_sql_int(user.historical_total(), "historical_total")?)
                    .bind(i64::from(user.current_streak()))
                    .bind(i64::from(user.longest_streak()))
                    .bind(user.timezone()),
                "Save user",
            )
            .await?;

        Ok(())
    }
}
