//! Leaderboard ranking.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LeaderboardEntry, LeaderboardQuery, PlayerRepository};
use crate::domain::repository_error_mapping::map_player_error;
use crate::domain::{Error, Player};

/// Number of players shown on the leaderboard.
pub const LEADERBOARD_LIMIT: usize = 10;

/// Order players by points descending, then earliest creation, and assign
/// 1-based ranks to the first [`LEADERBOARD_LIMIT`].
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use hunt::domain::{Player, PlayerId, PlayerName, rank_players};
///
/// let now = Utc::now();
/// let a = Player::new(PlayerId::random(), PlayerName::new("A1").expect("valid name"), 10, now);
/// let b = Player::new(PlayerId::random(), PlayerName::new("B1").expect("valid name"), 30, now + Duration::seconds(1));
/// let ranked = rank_players(vec![a, b]);
/// assert_eq!(ranked[0].name, "B1");
/// assert_eq!(ranked[1].rank, 2);
/// ```
pub fn rank_players(mut players: Vec<Player>) -> Vec<LeaderboardEntry> {
    players.sort_by(|left, right| {
        right
            .total_points()
            .cmp(&left.total_points())
            .then_with(|| left.created_at().cmp(&right.created_at()))
    });

    players
        .into_iter()
        .take(LEADERBOARD_LIMIT)
        .zip(1_u32..)
        .map(|(player, rank)| LeaderboardEntry {
            rank,
            player_id: player.id(),
            name: player.name().to_string(),
            total_points: player.total_points(),
        })
        .collect()
}

/// Leaderboard service implementing [`LeaderboardQuery`].
#[derive(Clone)]
pub struct LeaderboardService<P> {
    players: Arc<P>,
}

impl<P> LeaderboardService<P> {
    pub fn new(players: Arc<P>) -> Self {
        Self { players }
    }
}

#[async_trait]
impl<P> LeaderboardQuery for LeaderboardService<P>
where
    P: PlayerRepository,
{
    async fn top(&self) -> Result<Vec<LeaderboardEntry>, Error> {
        let players = self
            .players
            .list_top(LEADERBOARD_LIMIT)
            .await
            .map_err(map_player_error)?;
        Ok(rank_players(players))
    }
}
