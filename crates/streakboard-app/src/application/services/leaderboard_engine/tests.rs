use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use mockall::mock;

use super::*;
use crate::application::test_support::{
    activity, user, InMemoryActivityRepository, InMemoryLeaderboardRepository,
    InMemoryUserRepository,
};
use streakboard_domain::activity::DailyActivityRecord;
use streakboard_domain::user::User;

mock! {
    pub LeaderboardRepo {}

    #[async_trait]
    impl LeaderboardRepository for LeaderboardRepo {
        async fn upsert_entries(&self, entries: &[LeaderboardEntry]) -> Result<(), DomainError>;
        async fn list_period(
            &self,
            period: Period,
            limit: usize,
        ) -> Result<Vec<LeaderboardEntry>, DomainError>;
        async fn find_entry(
            &self,
            user_id: &UserId,
            period: Period,
        ) -> Result<Option<LeaderboardEntry>, DomainError>;
    }
}

/// Wednesday 2026-10-14, noon UTC. Week starts 10-12, month 10-01.
fn wednesday_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
}

struct Fixture {
    engine: LeaderboardRankingEngine,
    activity: Arc<InMemoryActivityRepository>,
    board: Arc<InMemoryLeaderboardRepository>,
}

fn fixture(users: Vec<User>, rows: Vec<DailyActivityRecord>, batch_size: usize) -> Fixture {
    let activity = Arc::new(InMemoryActivityRepository::with_rows(rows));
    let board = Arc::new(InMemoryLeaderboardRepository::default());
    let engine = LeaderboardRankingEngine::new(
        Arc::new(InMemoryUserRepository::with_users(users)),
        activity.clone(),
        board.clone(),
        LeaderboardConfig::new(batch_size).unwrap(),
    );
    Fixture {
        engine,
        activity,
        board,
    }
}

async fn entry_of(
    board: &InMemoryLeaderboardRepository,
    id: &str,
    period: Period,
) -> LeaderboardEntry {
    board
        .find_entry(&UserId::from_string(id), period)
        .await
        .unwrap()
        .expect("entry should exist")
}

fn scenario_users() -> Vec<User> {
    vec![user("A", 100, 200), user("B", 50, 50), user("C", 100, 200)]
}

fn scenario_activity() -> Vec<DailyActivityRecord> {
    vec![
        activity("A", "2026-10-12", 2),
        activity("A", "2026-10-13", 3),
        activity("B", "2026-10-14", 10),
    ]
}

#[tokio::test]
async fn test_weekly_and_all_time_scenario() {
    let f = fixture(scenario_users(), scenario_activity(), 100);

    let ranks = f
        .engine
        .recompute_leaderboard_at(wednesday_noon())
        .await
        .unwrap();

    assert_eq!(ranks.len(), 3);
    assert_eq!(ranks[&UserId::from_string("A")], 1);
    assert_eq!(ranks[&UserId::from_string("C")], 1);
    assert_eq!(ranks[&UserId::from_string("B")], 3);

    assert_eq!(f.board.rank_of("B", Period::Weekly).await, Some(1));
    assert_eq!(f.board.rank_of("A", Period::Weekly).await, Some(2));
    assert_eq!(f.board.rank_of("C", Period::Weekly).await, Some(3));
    assert_eq!(f.board.score_of("B", Period::Weekly).await, Some(10));
    assert_eq!(f.board.score_of("A", Period::Weekly).await, Some(5));
    assert_eq!(f.board.score_of("C", Period::Weekly).await, Some(0));

    assert_eq!(f.board.score_of("A", Period::AllTime).await, Some(300));
    assert_eq!(f.board.score_of("B", Period::AllTime).await, Some(100));
}

#[tokio::test]
async fn test_daily_period_counts_only_today() {
    let f = fixture(scenario_users(), scenario_activity(), 100);
    f.engine
        .recompute_leaderboard_at(wednesday_noon())
        .await
        .unwrap();

    assert_eq!(f.board.score_of("B", Period::Daily).await, Some(10));
    assert_eq!(f.board.score_of("A", Period::Daily).await, Some(0));
    assert_eq!(f.board.rank_of("A", Period::Daily).await, Some(2));
    assert_eq!(f.board.rank_of("C", Period::Daily).await, Some(2));
}

#[tokio::test]
async fn test_every_user_gets_every_period() {
    let f = fixture(scenario_users(), Vec::new(), 100);
    f.engine
        .recompute_leaderboard_at(wednesday_noon())
        .await
        .unwrap();

    let rows = f.board.snapshot().await;
    assert_eq!(rows.len(), 3 * Period::ALL.len());

    for period in [Period::Daily, Period::Weekly, Period::Monthly] {
        for id in ["A", "B", "C"] {
            assert_eq!(f.board.score_of(id, period).await, Some(0), "{} {}", id, period);
            assert_eq!(f.board.rank_of(id, period).await, Some(1));
        }
    }
}

#[tokio::test]
async fn test_all_time_ignores_activity_rows() {
    let rows = vec![activity("B", "2026-10-14", 5000)];
    let f = fixture(scenario_users(), rows, 100);

    let ranks = f
        .engine
        .recompute_leaderboard_at(wednesday_noon())
        .await
        .unwrap();

    assert_eq!(ranks[&UserId::from_string("B")], 3);
    assert_eq!(f.board.score_of("B", Period::AllTime).await, Some(100));
    assert_eq!(f.board.rank_of("B", Period::Monthly).await, Some(1));
}

#[tokio::test]
async fn test_recompute_is_idempotent() {
    let f = fixture(scenario_users(), scenario_activity(), 2);

    f.engine
        .recompute_leaderboard_at(wednesday_noon())
        .await
        .unwrap();
    let first = f.board.snapshot().await;

    f.engine
        .recompute_leaderboard_at(wednesday_noon() + Duration::minutes(15))
        .await
        .unwrap();
    let second = f.board.snapshot().await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_changed_standing_refreshes_updated_at() {
    let f = fixture(vec![user("A", 0, 0), user("B", 0, 0)], Vec::new(), 100);
    let later = wednesday_noon() + Duration::hours(1);

    f.engine
        .recompute_leaderboard_at(wednesday_noon())
        .await
        .unwrap();
    f.activity
        .record_daily_count(&activity("A", "2026-10-14", 3))
        .await
        .unwrap();
    f.engine.recompute_leaderboard_at(later).await.unwrap();

    let a_daily = entry_of(&f.board, "A", Period::Daily).await;
    assert_eq!(a_daily.score(), 3);
    assert_eq!(a_daily.updated_at(), later);

    let b_daily = entry_of(&f.board, "B", Period::Daily).await;
    assert_eq!(b_daily.rank(), 2);
    assert_eq!(b_daily.updated_at(), later);

    let a_all_time = entry_of(&f.board, "A", Period::AllTime).await;
    assert_eq!(a_all_time.updated_at(), wednesday_noon());
}

#[tokio::test]
async fn test_week_straddling_month_boundary_includes_previous_month() {
    // Thursday 2026-10-01; the week began Monday 2026-09-28.
    let now = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
    let users = vec![user("A", 0, 0), user("B", 0, 0)];
    let rows = vec![
        activity("A", "2026-09-27", 50),
        activity("A", "2026-09-28", 3),
        activity("A", "2026-09-30", 4),
        activity("B", "2026-10-01", 5),
    ];
    let f = fixture(users, rows, 100);

    f.engine.recompute_leaderboard_at(now).await.unwrap();

    assert_eq!(f.board.score_of("A", Period::Weekly).await, Some(7));
    assert_eq!(f.board.score_of("A", Period::Monthly).await, Some(0));
    assert_eq!(f.board.score_of("B", Period::Monthly).await, Some(5));
    assert_eq!(f.board.rank_of("A", Period::Weekly).await, Some(1));
    assert_eq!(f.board.rank_of("B", Period::Monthly).await, Some(1));
}

#[tokio::test]
async fn test_writes_are_chunked_by_batch_size() {
    let users = (0..5).map(|i| user(&format!("u{}", i), i, 0)).collect();
    let f = fixture(users, Vec::new(), 2);

    f.engine
        .recompute_leaderboard_at(wednesday_noon())
        .await
        .unwrap();

    let expected: Vec<usize> = Period::ALL.iter().flat_map(|_| [2, 2, 1]).collect();
    assert_eq!(f.board.batch_sizes().await, expected);
    assert_eq!(f.board.snapshot().await.len(), 20);
}

#[tokio::test]
async fn test_no_users_writes_nothing() {
    let f = fixture(Vec::new(), scenario_activity(), 100);

    let ranks = f
        .engine
        .recompute_leaderboard_at(wednesday_noon())
        .await
        .unwrap();

    assert!(ranks.is_empty());
    assert!(f.board.batch_sizes().await.is_empty());
}

#[tokio::test]
async fn test_failed_batch_aborts_remaining_periods() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut board = MockLeaderboardRepo::new();
    board.expect_upsert_entries().times(2).returning(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(())
        } else {
            Err(DomainError::Repository("disk I/O error".to_string()))
        }
    });

    let engine = LeaderboardRankingEngine::new(
        Arc::new(InMemoryUserRepository::with_users(vec![user("A", 1, 0)])),
        Arc::new(InMemoryActivityRepository::with_rows(Vec::new())),
        Arc::new(board),
        LeaderboardConfig::default(),
    );

    let result = engine.recompute_leaderboard_at(wednesday_noon()).await;

    match result {
        Err(DomainError::Repository(msg)) => assert_eq!(msg, "disk I/O error"),
        other => panic!("Expected Repository error, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_config_rejects_zero_batch_size() {
    assert!(LeaderboardConfig::new(0).is_err());
    assert_eq!(LeaderboardConfig::default().batch_size(), 100);
    assert_eq!(LeaderboardConfig::new(1).unwrap().batch_size(), 1);
}
