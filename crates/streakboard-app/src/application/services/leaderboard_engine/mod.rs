use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use streakboard_domain::activity::ActivityRepository;
use streakboard_domain::calendar::{ActivityDate, PeriodWindows};
use streakboard_domain::leaderboard::{
    rank_scores, score_period, LeaderboardEntry, LeaderboardRepository, Period,
};
use streakboard_domain::shared::{DomainError, UserId};
use streakboard_domain::user::UserRepository;

#[cfg(test)]
mod tests;

/// Tuning for the ranking engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardConfig {
    batch_size: usize,
}

impl LeaderboardConfig {
    pub const DEFAULT_BATCH_SIZE: usize = 100;

    pub fn new(batch_size: usize) -> Result<Self, DomainError> {
        if batch_size == 0 {
            return Err(DomainError::Validation(
                "Leaderboard batch size must be at least 1".to_string(),
            ));
        }
        Ok(Self { batch_size })
    }

    /// Rows per upsert call. Any value >= 1 persists the same result.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }
}

/// Recomputes the daily, weekly, monthly and all-time tables from source data.
///
/// Every run is a full recomputation; no state is kept between runs.
pub struct LeaderboardRankingEngine {
    user_repo: Arc<dyn UserRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    leaderboard_repo: Arc<dyn LeaderboardRepository>,
    config: LeaderboardConfig,
}

impl LeaderboardRankingEngine {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        leaderboard_repo: Arc<dyn LeaderboardRepository>,
        config: LeaderboardConfig,
    ) -> Self {
        Self {
            user_repo,
            activity_repo,
            leaderboard_repo,
            config,
        }
    }

    /// Recompute all four tables as of now (UTC) and return all-time ranks.
    pub async fn recompute_leaderboard(&self) -> Result<HashMap<UserId, u32>, DomainError> {
        self.recompute_leaderboard_at(Utc::now()).await
    }

    /// Recompute all four tables as of `now` and return all-time ranks.
    ///
    /// The first failed batch aborts the run. Batches already written stay
    /// written; calling again repairs the tables.
    pub async fn recompute_leaderboard_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<UserId, u32>, DomainError> {
        let started_at = Instant::now();
        let today = ActivityDate::utc_today(now)?;
        let windows = PeriodWindows::for_today(&today)?;

        let users = self.user_repo.list_users().await?;
        if users.is_empty() {
            info!(today = %today, "no users, leaderboard left untouched");
            return Ok(HashMap::new());
        }

        let activity = self
            .activity_repo
            .list_activity_since(windows.fetch_since())
            .await?;

        let known: HashSet<&UserId> = users.iter().map(|u| u.id()).collect();
        let orphaned = activity
            .iter()
            .filter(|row| !known.contains(row.user_id()))
            .count();
        if orphaned > 0 {
            debug!(orphaned, "ignoring activity rows for unknown users");
        }

        debug!(
            today = %today,
            week_start = %windows.week_start(),
            month_start = %windows.month_start(),
            users = users.len(),
            activity_rows = activity.len(),
            "leaderboard inputs loaded"
        );

        let mut all_time_ranks = HashMap::with_capacity(users.len());

        for period in Period::ALL {
            let ranked = rank_scores(score_period(period, &users, &activity, &windows));

            if period == Period::AllTime {
                all_time_ranks.extend(ranked.iter().map(|r| (r.user_id.clone(), r.rank)));
            }

            let entries: Vec<LeaderboardEntry> = ranked
                .into_iter()
                .map(|r| LeaderboardEntry::from_ranked(period, r, now))
                .collect();

            self.write_period(period, &entries).await?;
        }

        info!(
            users = users.len(),
            periods = Period::ALL.len(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "leaderboard recomputed"
        );

        Ok(all_time_ranks)
    }

    async fn write_period(
        &self,
        period: Period,
        entries: &[LeaderboardEntry],
    ) -> Result<(), DomainError> {
        for (batch, chunk) in entries.chunks(self.config.batch_size).enumerate() {
            if let Err(e) = self.leaderboard_repo.upsert_entries(chunk).await {
                error!(
                    period = %period,
                    batch,
                    rows = chunk.len(),
                    error = %e.format_with_code(),
                    "leaderboard batch upsert failed, aborting run"
                );
                return Err(e);
            }
        }

        debug!(period = %period, rows = entries.len(), "period written");
        Ok(())
    }
}
