use async_trait::async_trait;

use super::{LeaderboardEntry, Period};
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Upsert one batch keyed by `(user_id, period)`.
    ///
    /// Rows whose score and rank match the stored row must be left untouched,
    /// including `updated_at`, so an unchanged recompute writes nothing new.
    async fn upsert_entries(&self, entries: &[LeaderboardEntry]) -> Result<(), DomainError>;

    /// Top of one period's table, ordered by rank then user id.
    async fn list_period(
        &self,
        period: Period,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, DomainError>;

    async fn find_entry(
        &self,
        user_id: &UserId,
        period: Period,
    ) -> Result<Option<LeaderboardEntry>, DomainError>;
}
