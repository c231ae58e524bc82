pub mod activity_repo;
pub mod leaderboard_repo;
pub mod user_repo;

pub use activity_repo::SqliteActivityRepository;
pub use leaderboard_repo::SqliteLeaderboardRepository;
pub use user_repo::SqliteUserRepository;

use streakboard_domain::shared::DomainError;

/// SQLite integers are signed; counters are stored as i64.
pub(crate) fn to_sql_int(value: u64, field: &str) -> Result<i64, DomainError> {
    i64::try_from(value)
        .map_err(|_| DomainError::DataIntegrity(format!("{} out of range: {}", field, value)))
}

pub(crate) fn from_sql_int<T: TryFrom<i64>>(value: i64, field: &str) -> Result<T, DomainError> {
    T::try_from(value)
        .map_err(|_| DomainError::DataIntegrity(format!("{} out of range: {}", field, value)))
}
