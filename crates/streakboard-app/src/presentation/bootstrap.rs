use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::services::{AppConfig, LeaderboardRankingEngine, StreakService};
use crate::presentation::state::{AppState, Repositories, Runtime, Services};
use streakboard_domain::activity::ActivityRepository;
use streakboard_domain::leaderboard::LeaderboardRepository;
use streakboard_domain::shared::DomainError;
use streakboard_domain::user::UserRepository;
use streakboard_infrastructure::persistence::{
    repositories::{SqliteActivityRepository, SqliteLeaderboardRepository, SqliteUserRepository},
    Database,
};

/// Open the configured database, migrate it and wire services.
pub async fn build_app_state(config: AppConfig) -> Result<AppState, DomainError> {
    let db_path = config.database_path.to_str().ok_or_else(|| {
        DomainError::InvalidInput(format!(
            "Database path is not valid UTF-8: {:?}",
            config.database_path
        ))
    })?;

    info!("Database path: {}", db_path);

    let started_at = Instant::now();
    let database = Database::new(db_path).await?;
    info!(
        "✓ Database connection established ({}ms)",
        started_at.elapsed().as_millis()
    );

    build_app_state_with_database(database, config).await
}

/// Wire services over an already opened database. Migrations are applied here.
pub async fn build_app_state_with_database(
    database: Database,
    config: AppConfig,
) -> Result<AppState, DomainError> {
    let started_at = Instant::now();
    database.run_migrations().await?;
    info!(
        "✓ Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());

    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone())) as Arc<dyn UserRepository>;
    let activity_repo =
        Arc::new(SqliteActivityRepository::new(pool.clone())) as Arc<dyn ActivityRepository>;
    let leaderboard_repo =
        Arc::new(SqliteLeaderboardRepository::new(pool.clone())) as Arc<dyn LeaderboardRepository>;

    let leaderboard_config = config
        .leaderboard_config()
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    let leaderboard_engine = Arc::new(LeaderboardRankingEngine::new(
        user_repo.clone(),
        activity_repo.clone(),
        leaderboard_repo.clone(),
        leaderboard_config,
    ));
    let streak = Arc::new(StreakService::new(user_repo, activity_repo));

    Ok(AppState {
        runtime: Runtime { config },
        repositories: Repositories {
            leaderboard: leaderboard_repo,
        },
        services: Services {
            leaderboard_engine,
            streak,
        },
    })
}
