use serde::{Deserialize, Serialize};

use super::UserScore;
use crate::shared::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedScore {
    pub user_id: UserId,
    pub score: u64,
    pub rank: u32,
}

/// Assign standard competition ranks ("1224" ranking).
///
/// Output is sorted by score descending, then user id ascending. The id only
/// fixes the output order; tied scores always share a rank, and the next lower
/// score is ranked one past the number of entries above it.
pub fn rank_scores(mut scores: Vec<UserScore>) -> Vec<RankedScore> {
    scores.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    let mut ranked: Vec<RankedScore> = Vec::with_capacity(scores.len());
    for (i, entry) in scores.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if entry.score == prev.score => prev.rank,
            _ => u32::try_from(i + 1).unwrap_or(u32::MAX),
        };
        ranked.push(RankedScore {
            user_id: entry.user_id,
            score: entry.score,
            rank,
        });
    }
    ranked
}
