//! In-memory repositories shared by the application service tests.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use streakboard_domain::activity::{ActivityRepository, DailyActivityRecord};
use streakboard_domain::calendar::ActivityDate;
use streakboard_domain::leaderboard::{LeaderboardEntry, LeaderboardRepository, Period};
use streakboard_domain::shared::{DomainError, UserId};
use streakboard_domain::user::{User, UserRepository};

pub fn date(s: &str) -> ActivityDate {
    ActivityDate::parse(s).expect("valid date")
}

pub fn user(id: &str, rolling: u64, historical: u64) -> User {
    User::new(UserId::from_string(id), "UTC")
        .expect("valid user")
        .with_totals(rolling, historical)
}

pub fn activity(id: &str, day: &str, count: u32) -> DailyActivityRecord {
    DailyActivityRecord::new(UserId::from_string(id), date(day), count)
}

pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id().clone(), u)).collect()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.users
            .write()
            .await
            .insert(user.id().clone(), user.clone());
        Ok(())
    }
}

pub struct InMemoryActivityRepository {
    rows: RwLock<HashMap<(UserId, ActivityDate), DailyActivityRecord>>,
}

impl InMemoryActivityRepository {
    pub fn with_rows(rows: Vec<DailyActivityRecord>) -> Self {
        Self {
            rows: RwLock::new(
                rows.into_iter()
                    .map(|r| ((r.user_id().clone(), r.date().clone()), r))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn list_activity_since(
        &self,
        since: &ActivityDate,
    ) -> Result<Vec<DailyActivityRecord>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|r| r.date() >= since)
            .cloned()
            .collect())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<DailyActivityRecord>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn record_daily_count(
        &self,
        record: &DailyActivityRecord,
    ) -> Result<DailyActivityRecord, DomainError> {
        let mut rows = self.rows.write().await;
        let key = (record.user_id().clone(), record.date().clone());
        let stored = match rows.get(&key) {
            Some(existing) => existing.clone().merge_max(record),
            None => record.clone(),
        };
        rows.insert(key, stored.clone());
        Ok(stored)
    }
}

/// Keeps the table keyed like the real store and records every batch size.
#[derive(Default)]
pub struct InMemoryLeaderboardRepository {
    rows: RwLock<BTreeMap<(UserId, Period), LeaderboardEntry>>,
    batches: RwLock<Vec<usize>>,
}

impl InMemoryLeaderboardRepository {
    pub async fn snapshot(&self) -> Vec<LeaderboardEntry> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.batches.read().await.clone()
    }

    pub async fn rank_of(&self, id: &str, period: Period) -> Option<u32> {
        self.rows
            .read()
            .await
            .get(&(UserId::from_string(id), period))
            .map(|e| e.rank())
    }

    pub async fn score_of(&self, id: &str, period: Period) -> Option<u64> {
        self.rows
            .read()
            .await
            .get(&(UserId::from_string(id), period))
            .map(|e| e.score())
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryLeaderboardRepository {
    async fn upsert_entries(&self, entries: &[LeaderboardEntry]) -> Result<(), DomainError> {
        self.batches.write().await.push(entries.len());

        let mut rows = self.rows.write().await;
        for entry in entries {
            let key = (entry.user_id().clone(), entry.period());
            let unchanged = rows
                .get(&key)
                .is_some_and(|existing| existing.same_standing(entry));
            if !unchanged {
                rows.insert(key, entry.clone());
            }
        }
        Ok(())
    }

    async fn list_period(
        &self,
        period: Period,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, DomainError> {
        let mut entries: Vec<LeaderboardEntry> = self
            .rows
            .read()
            .await
            .values()
            .filter(|e| e.period() == period)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.rank().cmp(&b.rank()).then_with(|| a.user_id().cmp(b.user_id())));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn find_entry(
        &self,
        user_id: &UserId,
        period: Period,
    ) -> Result<Option<LeaderboardEntry>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .get(&(user_id.clone(), period))
            .cloned())
    }
}
