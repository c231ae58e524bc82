mod ranking;
mod repository;
mod scoring;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};

pub use ranking::{rank_scores, RankedScore};
pub use repository::LeaderboardRepository;
pub use scoring::{score_period, UserScore};

/// A scoring time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    AllTime,
}

impl Period {
    /// Every period, in the order a ranking run writes them.
    pub const ALL: [Period; 4] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::AllTime => "all_time",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "all_time" => Ok(Period::AllTime),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown leaderboard period: {}",
                other
            ))),
        }
    }
}

/// One user's standing in one period. Unique per `(user_id, period)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    user_id: UserId,
    period: Period,
    score: u64,
    rank: u32,
    updated_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn new(
        user_id: UserId,
        period: Period,
        score: u64,
        rank: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if rank == 0 {
            return Err(DomainError::Validation(
                "Leaderboard rank starts at 1".to_string(),
            ));
        }

        Ok(Self {
            user_id,
            period,
            score,
            rank,
            updated_at,
        })
    }

    pub fn restore(
        user_id: UserId,
        period: Period,
        score: u64,
        rank: u32,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            period,
            score,
            rank,
            updated_at,
        }
    }

    pub fn from_ranked(period: Period, ranked: RankedScore, updated_at: DateTime<Utc>) -> Self {
        Self {
            user_id: ranked.user_id,
            period,
            score: ranked.score,
            rank: ranked.rank,
            updated_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Same score and rank, ignoring the timestamp.
    pub fn same_standing(&self, other: &LeaderboardEntry) -> bool {
        self.score == other.score && self.rank == other.rank
    }
}
