use chrono::{Datelike, Duration};

use super::ActivityDate;
use crate::leaderboard::Period;
use crate::shared::DomainError;

/// Date boundaries of the scoring windows for one ranking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindows {
    today: ActivityDate,
    week_start: ActivityDate,
    month_start: ActivityDate,
}

impl PeriodWindows {
    pub fn for_today(today: &ActivityDate) -> Result<Self, DomainError> {
        // Sunday is the last day of the week, so it maps back six days.
        let back = i64::from(today.to_naive().weekday().num_days_from_monday());
        let week_start = ActivityDate::from_naive(today.to_naive() - Duration::days(back))?;
        let month_start = ActivityDate::parse(&format!("{}-01", today.year_month_str()))?;

        Ok(Self {
            today: today.clone(),
            week_start,
            month_start,
        })
    }

    pub fn today(&self) -> &ActivityDate {
        &self.today
    }

    pub fn week_start(&self) -> &ActivityDate {
        &self.week_start
    }

    pub fn month_start(&self) -> &ActivityDate {
        &self.month_start
    }

    /// First day counted by `period`, `None` for all-time.
    pub fn window_start(&self, period: Period) -> Option<&ActivityDate> {
        match period {
            Period::Daily => Some(&self.today),
            Period::Weekly => Some(&self.week_start),
            Period::Monthly => Some(&self.month_start),
            Period::AllTime => None,
        }
    }

    /// Earliest day any activity-backed window needs.
    ///
    /// Early in a month the week can start in the previous month.
    pub fn fetch_since(&self) -> &ActivityDate {
        std::cmp::min(&self.week_start, &self.month_start)
    }

    /// Whether `date` falls in `period`'s window (start and today inclusive).
    pub fn contains(&self, period: Period, date: &ActivityDate) -> bool {
        match self.window_start(period) {
            Some(start) => start <= date && date <= &self.today,
            None => false,
        }
    }
}
