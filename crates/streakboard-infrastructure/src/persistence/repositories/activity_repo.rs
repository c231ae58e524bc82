use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::from_sql_int;
use crate::persistence::SqliteRepositoryBase;
use streakboard_domain::activity::{ActivityRepository, DailyActivityRecord};
use streakboard_domain::calendar::ActivityDate;
use streakboard_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct ActivityRow {
    user_id: String,
    date: String,
    count: i64,
}

impl ActivityRow {
    fn try_into_record(self) -> Result<DailyActivityRecord, DomainError> {
        let date = ActivityDate::parse(&self.date)?;

        Ok(DailyActivityRecord::new(
            UserId::from_string(&self.user_id),
            date,
            from_sql_int(self.count, "count")?,
        ))
    }
}

pub struct SqliteActivityRepository {
    base: SqliteRepositoryBase,
}

impl SqliteActivityRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepository {
    async fn list_activity_since(
        &self,
        since: &ActivityDate,
    ) -> Result<Vec<DailyActivityRecord>, DomainError> {
        // Text comparison on zero-padded dates is chronological.
        let query = r#"
            SELECT user_id, date, count
            FROM daily_activity
            WHERE date >= ?1
            ORDER BY date ASC, user_id ASC
        "#;

        let rows: Vec<ActivityRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(since.as_str()),
                "List activity since date",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_record()).collect()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<DailyActivityRecord>, DomainError> {
        let query = r#"
            SELECT user_id, date, count
            FROM daily_activity
            WHERE user_id = ?1
            ORDER BY date DESC
        "#;

        let rows: Vec<ActivityRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(user_id.as_str()),
                "List activity for user",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_record()).collect()
    }

    async fn record_daily_count(
        &self,
        record: &DailyActivityRecord,
    ) -> Result<DailyActivityRecord, DomainError> {
        let query = r#"
            INSERT INTO daily_activity (user_id, date, count)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (user_id, date) DO UPDATE SET
                count = MAX(daily_activity.count, excluded.count)
            RETURNING user_id, date, count
        "#;

        let row: ActivityRow = self
            .base
            .fetch_one(
                sqlx::query_as(query)
                    .bind(record.user_id().as_str())
                    .bind(record.date().as_str())
                    .bind(i64::from(record.count())),
                "Record daily count",
            )
            .await?;

        row.try_into_record()
    }
}
