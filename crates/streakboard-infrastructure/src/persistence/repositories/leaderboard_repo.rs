use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use tracing::debug;

use super::{from_sql_int, to_sql_int};
use crate::persistence::SqliteRepositoryBase;
use streakboard_domain::leaderboard::{LeaderboardEntry, LeaderboardRepository, Period};
use streakboard_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct LeaderboardRow {
    user_id: String,
    period: String,
    score: i64,
    rank: i64,
    updated_at: DateTime<Utc>,
}

impl LeaderboardRow {
    fn try_into_entry(self) -> Result<LeaderboardEntry, DomainError> {
        let period: Period = self.period.parse()?;

        Ok(LeaderboardEntry::restore(
            UserId::from_string(&self.user_id),
            period,
            from_sql_int(self.score, "score")?,
            from_sql_int(self.rank, "rank")?,
            self.updated_at,
        ))
    }
}

pub struct SqliteLeaderboardRepository {
    base: SqliteRepositoryBase,
}

impl SqliteLeaderboardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl LeaderboardRepository for SqliteLeaderboardRepository {
    async fn upsert_entries(&self, entries: &[LeaderboardEntry]) -> Result<(), DomainError> {
        if entries.is_empty() {
            return Ok(());
        }

        // Unchanged standings are skipped by the WHERE clause so their
        // updated_at survives a re-run.
        let query = r#"
            INSERT INTO leaderboard_entries (user_id, period, score, rank, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (user_id, period) DO UPDATE SET
                score = excluded.score,
                rank = excluded.rank,
                updated_at = excluded.updated_at
            WHERE leaderboard_entries.score != excluded.score
               OR leaderboard_entries.rank != excluded.rank
        "#;

        let mut tx = self
            .base
            .pool()
            .begin()
            .await
            .map_err(|e| SqliteRepositoryBase::map_err("Begin leaderboard batch", e))?;

        let mut changed = 0u64;
        for entry in entries {
            let result = sqlx::query(query)
                .bind(entry.user_id().as_str())
                .bind(entry.period().as_str())
                .bind(to_sql_int(entry.score(), "score")?)
                .bind(i64::from(entry.rank()))
                .bind(entry.updated_at())
                .execute(&mut *tx)
                .await
                .map_err(|e| SqliteRepositoryBase::map_err("Upsert leaderboard entry", e))?;
            changed += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| SqliteRepositoryBase::map_err("Commit leaderboard batch", e))?;

        debug!(rows = entries.len(), changed, "leaderboard batch upserted");
        Ok(())
    }

    async fn list_period(
        &self,
        period: Period,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, DomainError> {
        let query = r#"
            SELECT user_id, period, score, rank, updated_at
            FROM leaderboard_entries
            WHERE period = ?1
            ORDER BY rank ASC, user_id ASC
            LIMIT ?2
        "#;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<LeaderboardRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(period.as_str()).bind(limit),
                "List leaderboard period",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_entry()).collect()
    }

    async fn find_entry(
        &self,
        user_id: &UserId,
        period: Period,
    ) -> Result<Option<LeaderboardEntry>, DomainError> {
        let query = r#"
            SELECT user_id, period, score, rank, updated_at
            FROM leaderboard_entries
            WHERE user_id = ?1 AND period = ?2
        "#;

        let row: Option<LeaderboardRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(period.as_str()),
                "Find leaderboard entry",
            )
            .await?;

        row.map(|r| r.try_into_entry()).transpose()
    }
}
