use serde::{Deserialize, Serialize};
use streakboard_domain::activity::DailyActivityRecord;

use super::StreakDto;

/// A stored day count together with the streak it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedActivityDto {
    pub user_id: String,
    pub date: String,
    /// Count kept after the write; may exceed the submitted one.
    pub count: u32,
    pub streak: StreakDto,
}

impl RecordedActivityDto {
    pub fn new(record: &DailyActivityRecord, streak: StreakDto) -> Self {
        Self {
            user_id: record.user_id().to_string(),
            date: record.date().to_string(),
            count: record.count(),
            streak,
        }
    }
}
