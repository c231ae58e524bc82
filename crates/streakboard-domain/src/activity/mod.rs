mod repository;

use serde::{Deserialize, Serialize};

use crate::calendar::ActivityDate;
use crate::shared::UserId;

pub use repository::ActivityRepository;

/// One user's contribution count for one calendar day.
///
/// Unique per `(user_id, date)`. A missing record means a count of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivityRecord {
    user_id: UserId,
    date: ActivityDate,
    count: u32,
}

impl DailyActivityRecord {
    pub fn new(user_id: UserId, date: ActivityDate, count: u32) -> Self {
        Self {
            user_id,
            date,
            count,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> &ActivityDate {
        &self.date
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn day_count(&self) -> DayCount {
        DayCount {
            date: self.date.clone(),
            count: self.count,
        }
    }

    /// Keep the higher of two counts for the same day.
    pub fn merge_max(self, other: &DailyActivityRecord) -> Self {
        Self {
            count: self.count.max(other.count),
            ..self
        }
    }
}

/// A `(date, count)` pair, the streak calculator's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: ActivityDate,
    pub count: u32,
}

impl DayCount {
    pub fn new(date: ActivityDate, count: u32) -> Self {
        Self { date, count }
    }
}
