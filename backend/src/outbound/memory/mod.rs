//! In-memory data store.
//!
//! Implements the player, keyword and discovery repositories over one mutex
//! so every operation is atomic with respect to the others. Used when no
//! database URL is configured and by the HTTP integration tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    ConditionalUpdate, DiscoveryRepository, DiscoveryRepositoryError, InsertOutcome,
    KeywordRepository, KeywordRepositoryError, PlayerRepository, PlayerRepositoryError,
    RecordOutcome,
};
use crate::domain::{
    Discovery, Keyword, KeywordId, NamedDiscovery, Player, PlayerId, PlayerName,
};

#[derive(Debug, Default)]
struct State {
    players: Vec<Player>,
    keywords: Vec<Keyword>,
    discoveries: Vec<Discovery>,
}

impl State {
    fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id() == *id)
    }
}

const POISONED: &str = "in-memory store lock poisoned";

/// Mutex-guarded store shared by all three repository ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, &'static str> {
        self.state.lock().map_err(|_| POISONED)
    }
}

#[async_trait]
impl PlayerRepository for InMemoryStore {
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>, PlayerRepositoryError> {
        let state = self.lock().map_err(PlayerRepositoryError::query)?;
        Ok(state.players.iter().find(|player| player.id() == *id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &PlayerName,
    ) -> Result<Option<Player>, PlayerRepositoryError> {
        let state = self.lock().map_err(PlayerRepositoryError::query)?;
        Ok(state
            .players
            .iter()
            .find(|player| player.name().matches(name))
            .cloned())
    }

    async fn insert(&self, player: &Player) -> Result<InsertOutcome, PlayerRepositoryError> {
        let mut state = self.lock().map_err(PlayerRepositoryError::query)?;
        let taken = state
            .players
            .iter()
            .any(|existing| existing.id() == player.id() || existing.name().matches(player.name()));
        if taken {
            return Ok(InsertOutcome::Conflict);
        }
        state.players.push(player.clone());
        Ok(InsertOutcome::Created)
    }

    async fn list_top(&self, limit: usize) -> Result<Vec<Player>, PlayerRepositoryError> {
        let state = self.lock().map_err(PlayerRepositoryError::query)?;
        let mut players = state.players.clone();
        players.sort_by(|left, right| {
            right
                .total_points()
                .cmp(&left.total_points())
                .then_with(|| left.created_at().cmp(&right.created_at()))
        });
        players.truncate(limit);
        Ok(players)
    }
}

#[async_trait]
impl KeywordRepository for InMemoryStore {
    async fn find_by_id(&self, id: &KeywordId) -> Result<Option<Keyword>, KeywordRepositoryError> {
        let state = self.lock().map_err(KeywordRepositoryError::query)?;
        Ok(state
            .keywords
            .iter()
            .find(|keyword| keyword.id() == *id)
            .cloned())
    }

    async fn list_by_points_desc(&self) -> Result<Vec<Keyword>, KeywordRepositoryError> {
        let state = self.lock().map_err(KeywordRepositoryError::query)?;
        let mut keywords = state.keywords.clone();
        keywords.sort_by(|left, right| {
            right
                .points()
                .cmp(&left.points())
                .then_with(|| left.word().cmp(right.word()))
        });
        Ok(keywords)
    }

    async fn claim_if_unclaimed(
        &self,
        id: &KeywordId,
        player_id: &PlayerId,
        at: DateTime<Utc>,
    ) -> Result<ConditionalUpdate, KeywordRepositoryError> {
        let mut state = self.lock().map_err(KeywordRepositoryError::query)?;
        let applied = state
            .keywords
            .iter_mut()
            .find(|keyword| keyword.id() == *id)
            .is_some_and(|keyword| keyword.apply_claim(*player_id, at));
        Ok(if applied {
            ConditionalUpdate::Applied
        } else {
            ConditionalUpdate::Rejected
        })
    }

    async fn seed(&self, keywords: &[Keyword]) -> Result<usize, KeywordRepositoryError> {
        let mut state = self.lock().map_err(KeywordRepositoryError::query)?;
        let mut written = 0;
        for keyword in keywords {
            if state.keywords.iter().any(|existing| existing.id() == keyword.id()) {
                continue;
            }
            state.keywords.push(keyword.clone());
            written += 1;
        }
        Ok(written)
    }
}

#[async_trait]
impl DiscoveryRepository for InMemoryStore {
    async fn record_and_credit(
        &self,
        discovery: &Discovery,
        points: u32,
    ) -> Result<RecordOutcome, DiscoveryRepositoryError> {
        let mut state = self.lock().map_err(DiscoveryRepositoryError::query)?;
        let duplicate = state.discoveries.iter().any(|existing| {
            existing.player_id == discovery.player_id && existing.keyword_id == discovery.keyword_id
        });
        if duplicate {
            return Ok(RecordOutcome::Duplicate);
        }

        let player = state
            .player_mut(&discovery.player_id)
            .ok_or_else(|| DiscoveryRepositoryError::player_missing(discovery.player_id.to_string()))?;
        let total_points = player
            .total_points()
            .checked_add(points)
            .ok_or_else(|| DiscoveryRepositoryError::query("player total overflowed"))?;
        *player = Player::new(
            player.id(),
            player.name().clone(),
            total_points,
            player.created_at(),
        );
        state.discoveries.push(*discovery);

        Ok(RecordOutcome::Recorded { total_points })
    }

    async fn list_with_player_names(
        &self,
    ) -> Result<Vec<NamedDiscovery>, DiscoveryRepositoryError> {
        let state = self.lock().map_err(DiscoveryRepositoryError::query)?;
        let mut named: Vec<NamedDiscovery> = state
            .discoveries
            .iter()
            .filter_map(|discovery| {
                state
                    .players
                    .iter()
                    .find(|player| player.id() == discovery.player_id)
                    .map(|player| NamedDiscovery {
                        discovery: *discovery,
                        player_name: player.name().to_string(),
                    })
            })
            .collect();
        named.sort_by_key(|entry| entry.discovery.discovered_at);
        Ok(named)
    }

    async fn list_for_player(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<Discovery>, DiscoveryRepositoryError> {
        let state = self.lock().map_err(DiscoveryRepositoryError::query)?;
        let mut mine: Vec<Discovery> = state
            .discoveries
            .iter()
            .filter(|discovery| discovery.player_id == *player_id)
            .copied()
            .collect();
        mine.sort_by_key(|discovery| discovery.discovered_at);
        Ok(mine)
    }
}
