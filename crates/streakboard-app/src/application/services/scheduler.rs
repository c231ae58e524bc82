use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};
use uuid::Uuid;

use streakboard_domain::shared::DomainError;

use super::LeaderboardRankingEngine;
use crate::application::ResultExt;

/// Runs the ranking engine on a cron schedule.
pub struct LeaderboardScheduler {
    scheduler: JobScheduler,
    job_id: Uuid,
    cron: String,
}

impl LeaderboardScheduler {
    /// Build the scheduler and register the recompute job. Nothing runs until `start`.
    pub async fn new(
        engine: Arc<LeaderboardRankingEngine>,
        cron: &str,
    ) -> Result<Self, DomainError> {
        let scheduler = JobScheduler::new().await.to_infra_err()?;
        // A tick that fires while the previous run is still writing is skipped.
        let running = Arc::new(Mutex::new(()));

        let job = Job::new_async(cron, move |job_id, _scheduler| {
            let engine = Arc::clone(&engine);
            let running = Arc::clone(&running);
            Box::pin(async move {
                let Ok(_guard) = running.try_lock() else {
                    warn!(%job_id, "previous leaderboard run still in progress, skipping tick");
                    return;
                };

                match engine.recompute_leaderboard().await {
                    Ok(ranks) => info!(%job_id, users = ranks.len(), "scheduled recompute finished"),
                    Err(e) => error!(
                        %job_id,
                        error = %e.format_with_code(),
                        recoverable = e.is_recoverable(),
                        "scheduled recompute failed"
                    ),
                }
            })
        })
        .map_err(|e| DomainError::Validation(format!("Invalid cron expression '{}': {}", cron, e)))?;

        let job_id = scheduler.add(job).await.to_infra_err()?;

        Ok(Self {
            scheduler,
            job_id,
            cron: cron.to_string(),
        })
    }

    pub async fn start(&self) -> Result<(), DomainError> {
        self.scheduler.start().await.to_infra_err()?;
        info!(job_id = %self.job_id, cron = %self.cron, "leaderboard scheduler started");
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<(), DomainError> {
        self.scheduler.shutdown().await.to_infra_err()?;
        info!(job_id = %self.job_id, "leaderboard scheduler stopped");
        Ok(())
    }

    pub fn cron(&self) -> &str {
        &self.cron
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::LeaderboardConfig;
    use crate::application::test_support::{
        InMemoryActivityRepository, InMemoryLeaderboardRepository, InMemoryUserRepository,
    };

    fn engine() -> Arc<LeaderboardRankingEngine> {
        Arc::new(LeaderboardRankingEngine::new(
            Arc::new(InMemoryUserRepository::with_users(Vec::new())),
            Arc::new(InMemoryActivityRepository::with_rows(Vec::new())),
            Arc::new(InMemoryLeaderboardRepository::default()),
            LeaderboardConfig::default(),
        ))
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_rejects_invalid_cron() {
        let result = LeaderboardScheduler::new(engine(), "every now and then").await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_registers_default_schedule() {
        let scheduler = LeaderboardScheduler::new(engine(), "0 */15 * * * *")
            .await
            .unwrap();

        assert_eq!(scheduler.cron(), "0 */15 * * * *");
    }
}
