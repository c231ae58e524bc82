use std::sync::Arc;

use crate::application::services::{AppConfig, LeaderboardRankingEngine, StreakService};
use streakboard_domain::leaderboard::LeaderboardRepository;

pub struct Runtime {
    pub config: AppConfig,
}

pub struct Repositories {
    pub leaderboard: Arc<dyn LeaderboardRepository>,
}

pub struct Services {
    pub leaderboard_engine: Arc<LeaderboardRankingEngine>,
    pub streak: Arc<StreakService>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
}
