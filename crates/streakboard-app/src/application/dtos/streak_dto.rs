use serde::{Deserialize, Serialize};
use streakboard_domain::calendar::ActivityDate;
use streakboard_domain::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakDto {
    pub user_id: String,
    pub today: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub rolling_total: u64,
    pub total_score: u64,
}

impl StreakDto {
    pub fn from_user(user: &User, today: &ActivityDate) -> Self {
        Self {
            user_id: user.id().to_string(),
            today: today.to_string(),
            current_streak: user.current_streak(),
            longest_streak: user.longest_streak(),
            rolling_total: user.rolling_total(),
            total_score: user.all_time_score(),
        }
    }
}
