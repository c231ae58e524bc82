mod config_service;
mod leaderboard_engine;
mod scheduler;
mod streak_service;

pub use config_service::{default_config_path, AppConfig, LogLevel, DEFAULT_RECOMPUTE_CRON};
pub use leaderboard_engine::{LeaderboardConfig, LeaderboardRankingEngine};
pub use scheduler::LeaderboardScheduler;
pub use streak_service::StreakService;
