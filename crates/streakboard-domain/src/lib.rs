// Domain layer - Pure business logic
// No dependencies on infrastructure or application layers

pub mod activity;
pub mod calendar;
pub mod leaderboard;
pub mod shared;
pub mod streak;
pub mod user;

// Re-exports for convenience
pub use calendar::ActivityDate;
pub use shared::{DomainError, UserId};
