use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};

use streakboard_domain::activity::{ActivityRepository, DailyActivityRecord, DayCount};
use streakboard_domain::calendar::{today_in_timezone, ActivityDate};
use streakboard_domain::shared::{DomainError, UserId};
use streakboard_domain::streak::calculate_streak;
use streakboard_domain::user::{User, UserRepository};

use crate::application::dtos::StreakDto;

/// Keeps each user's streak counters and rolling total in step with their activity.
pub struct StreakService {
    user_repo: Arc<dyn UserRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
}

impl StreakService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
    ) -> Self {
        Self {
            user_repo,
            activity_repo,
        }
    }

    pub async fn refresh_user_streak(&self, user_id: &UserId) -> Result<StreakDto, DomainError> {
        self.refresh_user_streak_at(user_id, Utc::now()).await
    }

    /// Recalculate streaks and the rolling total for one user as of `now`,
    /// evaluated on the calendar of the user's timezone.
    pub async fn refresh_user_streak_at(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<StreakDto, DomainError> {
        let mut user = self.load_user(user_id).await?;
        let today = today_in_timezone(user.timezone(), now)?;

        let records = self.activity_repo.list_for_user(user_id).await?;
        let days: Vec<DayCount> = records.iter().map(|r| r.day_count()).collect();

        let summary = calculate_streak(&days, &today);
        let rolling_total = year_total(&records, &today);

        user.apply_refresh(summary, rolling_total);
        self.user_repo.save(&user).await?;

        info!(
            "[streak] {} refreshed: current={} longest={} rolling_total={} (today {})",
            user_id,
            user.current_streak(),
            user.longest_streak(),
            user.rolling_total(),
            today
        );

        Ok(StreakDto::from_user(&user, &today))
    }

    /// Add a new user with carried-over historical points. Existing ids are rejected.
    pub async fn register_user(
        &self,
        user_id: &UserId,
        timezone: &str,
        historical_total: u64,
    ) -> Result<User, DomainError> {
        if self.user_repo.find_by_id(user_id).await?.is_some() {
            return Err(DomainError::Validation(format!(
                "User {} already exists",
                user_id
            )));
        }

        let user = User::new(user_id.clone(), timezone)?.with_totals(0, historical_total);
        self.user_repo.save(&user).await?;

        info!(
            "[streak] registered {} (timezone {}, historical_total {})",
            user_id,
            user.timezone(),
            historical_total
        );

        Ok(user)
    }

    /// Store a day's count for an existing user. A lower count never replaces a higher one.
    pub async fn record_activity(
        &self,
        user_id: &UserId,
        date: ActivityDate,
        count: u32,
    ) -> Result<DailyActivityRecord, DomainError> {
        self.load_user(user_id).await?;

        let record = DailyActivityRecord::new(user_id.clone(), date, count);
        let stored = self.activity_repo.record_daily_count(&record).await?;

        debug!(
            "[streak] {} recorded {} on {} (stored {})",
            user_id,
            count,
            stored.date(),
            stored.count()
        );

        Ok(stored)
    }

    async fn load_user(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))
    }
}

/// Sum of counts dated in the same calendar year as `today`.
fn year_total(records: &[DailyActivityRecord], today: &ActivityDate) -> u64 {
    records
        .iter()
        .filter(|r| r.date().year_str() == today.year_str())
        .map(|r| u64::from(r.count()))
        .sum()
}
