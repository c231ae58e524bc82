use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use streakboard_domain::leaderboard::{LeaderboardEntry, Period};
use streakboard_domain::shared::UserId;

/// Outcome of one ranking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRunDto {
    pub success: bool,
    pub periods: usize,
    pub users: usize,
    pub timestamp: String,
    /// All-time rank per user id, ordered by id.
    pub all_time_ranks: BTreeMap<String, u32>,
}

impl LeaderboardRunDto {
    pub fn new(ranks: &HashMap<UserId, u32>, at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            periods: Period::ALL.len(),
            users: ranks.len(),
            timestamp: at.to_rfc3339(),
            all_time_ranks: ranks
                .iter()
                .map(|(id, rank)| (id.to_string(), *rank))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntryDto {
    pub user_id: String,
    pub period: Period,
    pub score: u64,
    pub rank: u32,
    pub updated_at: String,
}

impl From<&LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            user_id: entry.user_id().to_string(),
            period: entry.period(),
            score: entry.score(),
            rank: entry.rank(),
            updated_at: entry.updated_at().to_rfc3339(),
        }
    }
}
