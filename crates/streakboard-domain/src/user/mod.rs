mod repository;

use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};
use crate::streak::StreakSummary;

pub use repository::UserRepository;

pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Largest score a leaderboard row can hold (SQLite INTEGER is signed 64-bit).
pub const MAX_SCORE: u64 = i64::MAX as u64;

/// A tracked developer and the lifetime counters ranked on the all-time board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    rolling_total: u64,
    historical_total: u64,
    current_streak: u32,
    longest_streak: u32,
    timezone: String,
}

impl User {
    pub fn new(id: UserId, timezone: &str) -> Result<Self, DomainError> {
        if id.as_str().trim().is_empty() {
            return Err(DomainError::Validation(
                "User id cannot be empty".to_string(),
            ));
        }

        let timezone = if timezone.trim().is_empty() {
            DEFAULT_TIMEZONE.to_string()
        } else {
            timezone.to_string()
        };

        Ok(Self {
            id,
            rolling_total: 0,
            historical_total: 0,
            current_streak: 0,
            longest_streak: 0,
            timezone,
        })
    }

    /// Restore a user from persistence
    pub fn restore(
        id: UserId,
        rolling_total: u64,
        historical_total: u64,
        current_streak: u32,
        longest_streak: u32,
        timezone: String,
    ) -> Self {
        Self {
            id,
            rolling_total,
            historical_total,
            current_streak,
            longest_streak,
            timezone,
        }
    }

    pub fn with_totals(mut self, rolling_total: u64, historical_total: u64) -> Self {
        self.rolling_total = rolling_total;
        self.historical_total = historical_total;
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn rolling_total(&self) -> u64 {
        self.rolling_total
    }

    pub fn historical_total(&self) -> u64 {
        self.historical_total
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// The all-time leaderboard score, capped at [`MAX_SCORE`].
    pub fn all_time_score(&self) -> u64 {
        self.rolling_total
            .saturating_add(self.historical_total)
            .min(MAX_SCORE)
    }

    /// Apply a freshly calculated streak and the recounted rolling total.
    ///
    /// A stored longest streak is never lowered.
    pub fn apply_refresh(&mut self, streak: StreakSummary, rolling_total: u64) {
        self.current_streak = streak.current_streak;
        self.longest_streak = self.longest_streak.max(streak.longest_streak);
        self.rolling_total = rolling_total;
    }
}
