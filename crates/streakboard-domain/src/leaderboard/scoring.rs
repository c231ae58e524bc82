use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Period;
use crate::activity::DailyActivityRecord;
use crate::calendar::PeriodWindows;
use crate::shared::UserId;
use crate::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScore {
    pub user_id: UserId,
    pub score: u64,
}

impl UserScore {
    pub fn new(user_id: UserId, score: u64) -> Self {
        Self { user_id, score }
    }
}

/// Score every user for one period.
///
/// Returns exactly one entry per user, in `users` order, zero when the user
/// has no activity in the window. All-time scores come from the user's
/// counters and ignore `activity`. Rows for users not in `users` are dropped.
pub fn score_period(
    period: Period,
    users: &[User],
    activity: &[DailyActivityRecord],
    windows: &PeriodWindows,
) -> Vec<UserScore> {
    if period == Period::AllTime {
        return users
            .iter()
            .map(|u| UserScore::new(u.id().clone(), u.all_time_score()))
            .collect();
    }

    let mut totals: HashMap<&UserId, u64> = HashMap::new();
    for row in activity
        .iter()
        .filter(|row| windows.contains(period, row.date()))
    {
        *totals.entry(row.user_id()).or_default() += u64::from(row.count());
    }

    users
        .iter()
        .map(|u| UserScore::new(u.id().clone(), totals.get(u.id()).copied().unwrap_or(0)))
        .collect()
}
