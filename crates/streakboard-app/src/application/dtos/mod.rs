mod activity_dto;
mod leaderboard_dto;
mod streak_dto;
mod user_dto;

pub use activity_dto::RecordedActivityDto;
pub use leaderboard_dto::{LeaderboardEntryDto, LeaderboardRunDto};
pub use streak_dto::StreakDto;
pub use user_dto::UserDto;
