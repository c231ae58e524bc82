//! Handlers behind each CLI subcommand. Each returns a serializable result.

use chrono::Utc;
use std::path::Path;

use crate::application::dtos::{
    LeaderboardEntryDto, LeaderboardRunDto, RecordedActivityDto, StreakDto, UserDto,
};
use crate::application::services::AppConfig;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use streakboard_domain::calendar::ActivityDate;
use streakboard_domain::leaderboard::{LeaderboardRepository, Period};
use streakboard_domain::shared::{DomainError, UserId};

pub async fn recompute_leaderboard(state: &AppState) -> Result<LeaderboardRunDto, CommandError> {
    let now = Utc::now();
    let ranks = state
        .services
        .leaderboard_engine
        .recompute_leaderboard_at(now)
        .await?;
    Ok(LeaderboardRunDto::new(&ranks, now))
}

pub async fn refresh_streak(state: &AppState, user: &str) -> Result<StreakDto, CommandError> {
    let user_id = parse_user_id(user)?;
    Ok(state.services.streak.refresh_user_streak(&user_id).await?)
}

pub async fn record_activity(
    state: &AppState,
    user: &str,
    date: ActivityDate,
    count: u32,
) -> Result<RecordedActivityDto, CommandError> {
    let user_id = parse_user_id(user)?;
    let stored = state
        .services
        .streak
        .record_activity(&user_id, date, count)
        .await?;
    let streak = state.services.streak.refresh_user_streak(&user_id).await?;
    Ok(RecordedActivityDto::new(&stored, streak))
}

pub async fn list_leaderboard(
    state: &AppState,
    period: Period,
    limit: usize,
) -> Result<Vec<LeaderboardEntryDto>, CommandError> {
    let entries = state
        .repositories
        .leaderboard
        .list_period(period, limit)
        .await?;
    Ok(entries.iter().map(LeaderboardEntryDto::from).collect())
}

pub async fn find_standing(
    state: &AppState,
    period: Period,
    user: &str,
) -> Result<LeaderboardEntryDto, CommandError> {
    let user_id = parse_user_id(user)?;
    let entry = state
        .repositories
        .leaderboard
        .find_entry(&user_id, period)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound(format!("No {} standing for {}", period, user_id))
        })?;
    Ok(LeaderboardEntryDto::from(&entry))
}

pub async fn add_user(
    state: &AppState,
    user: &str,
    timezone: &str,
    historical: u64,
) -> Result<UserDto, CommandError> {
    let user_id = parse_user_id(user)?;
    let created = state
        .services
        .streak
        .register_user(&user_id, timezone, historical)
        .await?;
    Ok(UserDto::from(&created))
}

/// Write `config` to `path` and echo what was written.
pub fn init_config(config: &AppConfig, path: &Path) -> Result<AppConfig, CommandError> {
    config.save(path)?;
    Ok(config.clone())
}

fn parse_user_id(raw: &str) -> Result<UserId, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput("User id cannot be empty".to_string()));
    }
    Ok(UserId::from_string(trimmed))
}
