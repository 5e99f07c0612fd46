//! Driving port for the leaderboard.

use async_trait::async_trait;

use crate::domain::{Error, PlayerId};

/// One ranked leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: u32,
    pub player_id: PlayerId,
    pub name: String,
    pub total_points: u32,
}

/// Driving port for reading the top of the leaderboard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardQuery: Send + Sync {
    async fn top(&self) -> Result<Vec<LeaderboardEntry>, Error>;
}
