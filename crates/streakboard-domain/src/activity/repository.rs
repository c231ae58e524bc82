use async_trait::async_trait;

use super::DailyActivityRecord;
use crate::calendar::ActivityDate;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// All users' records dated on or after `since`.
    async fn list_activity_since(
        &self,
        since: &ActivityDate,
    ) -> Result<Vec<DailyActivityRecord>, DomainError>;

    /// Every record for one user, any order.
    async fn list_for_user(&self, user_id: &UserId)
        -> Result<Vec<DailyActivityRecord>, DomainError>;

    /// Upsert a day's count without ever lowering a stored value.
    ///
    /// Returns the record as stored.
    async fn record_daily_count(
        &self,
        record: &DailyActivityRecord,
    ) -> Result<DailyActivityRecord, DomainError>;
}
