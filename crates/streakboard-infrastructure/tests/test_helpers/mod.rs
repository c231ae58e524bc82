#![allow(dead_code)]

use std::sync::Arc;

use sqlx::SqlitePool;
use streakboard_domain::activity::DailyActivityRecord;
use streakboard_domain::calendar::ActivityDate;
use streakboard_domain::shared::UserId;
use streakboard_domain::user::User;
use streakboard_infrastructure::persistence::Database;

/// Fresh in-memory database with migrations applied.
pub async fn setup_in_memory_db() -> Arc<SqlitePool> {
    let database = Database::in_memory().await.expect("open in-memory db");
    database.run_migrations().await.expect("run migrations");
    Arc::new(database.pool().clone())
}

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
