use serde::{Deserialize, Serialize};
use streakboard_domain::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub timezone: String,
    pub rolling_total: u64,
    pub historical_total: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            timezone: user.timezone().to_string(),
            rolling_total: user.rolling_total(),
            historical_total: user.historical_total(),
            current_streak: user.current_streak(),
            longest_streak: user.longest_streak(),
        }
    }
}
