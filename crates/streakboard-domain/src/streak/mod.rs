//! Consecutive-day streaks over a user's daily activity.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::activity::DayCount;
use crate::calendar::ActivityDate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Compute the current and longest streak as of `today`.
///
/// Records may arrive in any order and may be sparse; a day without a record,
/// or with a zero count, is inactive. An inactive `today` does not break the
/// current streak, the walk simply starts from yesterday.
pub fn calculate_streak(records: &[DayCount], today: &ActivityDate) -> StreakSummary {
    let active: HashSet<&ActivityDate> = records
        .iter()
        .filter(|r| r.count > 0)
        .map(|r| &r.date)
        .collect();

    if active.is_empty() {
        return StreakSummary::default();
    }

    let current_streak = current_run(&active, today);

    // The chronological scan starts at the earliest record of any count.
    let longest = records
        .iter()
        .map(|r| &r.date)
        .min()
        .map_or(0, |earliest| longest_run(&active, earliest, today));

    StreakSummary {
        current_streak,
        longest_streak: longest.max(current_streak),
    }
}

fn current_run(active: &HashSet<&ActivityDate>, today: &ActivityDate) -> u32 {
    let mut cursor = if active.contains(today) {
        Some(today.clone())
    } else {
        today.pred()
    };

    let mut streak = 0;
    while let Some(day) = cursor.take().filter(|d| active.contains(d)) {
        streak += 1;
        cursor = day.pred();
    }
    streak
}

fn longest_run(active: &HashSet<&ActivityDate>, earliest: &ActivityDate, today: &ActivityDate) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut cursor = Some(earliest.clone());

    while let Some(day) = cursor.take().filter(|d| d <= today) {
        if active.contains(&day) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
        cursor = day.succ();
    }
    longest
}
