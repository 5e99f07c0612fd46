//! Dashboard read model assembly.
//!
//! Combines keywords, the discovery log and the leaderboard into the view a
//! player sees after logging in.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::leaderboard::{LEADERBOARD_LIMIT, rank_players};
use crate::domain::ports::{
    Dashboard, DashboardKeyword, DashboardQuery, DiscoveryRepository, Finder, KeywordRepository,
    PlayerRepository, Progress, ViewerDiscovery,
};
use crate::domain::repository_error_mapping::{
    map_discovery_error, map_keyword_error, map_player_error,
};
use crate::domain::{Error, KeywordId, PlayerId};

/// Dashboard service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService<K, D, P> {
    keywords: Arc<K>,
    discoveries: Arc<D>,
    players: Arc<P>,
}

impl<K, D, P> DashboardService<K, D, P> {
    pub fn new(keywords: Arc<K>, discoveries: Arc<D>, players: Arc<P>) -> Self {
        Self {
            keywords,
            discoveries,
            players,
        }
    }
}

#[async_trait]
impl<K, D, P> DashboardQuery for DashboardService<K, D, P>
where
    K: KeywordRepository,
    D: DiscoveryRepository,
    P: PlayerRepository,
{
    async fn dashboard(&self, viewer: PlayerId) -> Result<Dashboard, Error> {
        let keywords = self
            .keywords
            .list_by_points_desc()
            .await
            .map_err(map_keyword_error)?;
        let everyone = self
            .discoveries
            .list_with_player_names()
            .await
            .map_err(map_discovery_error)?;
        let mine = self
            .discoveries
            .list_for_player(&viewer)
            .await
            .map_err(map_discovery_error)?;
        let top = self
            .players
            .list_top(LEADERBOARD_LIMIT)
            .await
            .map_err(map_player_error)?;

        let mut finders: HashMap<KeywordId, Vec<Finder>> = HashMap::new();
        for named in everyone {
            finders
                .entry(named.discovery.keyword_id)
                .or_default()
                .push(Finder {
                    player_name: named.player_name,
                    discovered_at: named.discovery.discovered_at,
                });
        }
        let found_by_viewer: HashSet<KeywordId> =
            mine.iter().map(|discovery| discovery.keyword_id).collect();

        let total = keywords.len();
        let dashboard_keywords = keywords
            .into_iter()
            .map(|keyword| DashboardKeyword {
                keyword_id: keyword.id(),
                word: keyword.word().to_owned(),
                points: keyword.points(),
                size: keyword.size(),
                is_found: keyword.is_found(),
                found_by_viewer: found_by_viewer.contains(&keyword.id()),
                finders: finders.remove(&keyword.id()).unwrap_or_default(),
            })
            .collect();

        Ok(Dashboard {
            keywords: dashboard_keywords,
            progress: Progress::new(mine.len(), total),
            viewer_discoveries: mine
                .into_iter()
                .map(|discovery| ViewerDiscovery {
                    keyword_id: discovery.keyword_id,
                    discovered_at: discovery.discovered_at,
                })
                .collect(),
            leaderboard: rank_players(top),
        })
    }
}
