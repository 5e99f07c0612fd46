//! Keyword claim protocol.
//!
//! The protocol credits a player for a keyword at most once, even when the
//! same QR code is scanned on two devices at the same time or a confirmation
//! is resubmitted. Two store-enforced mechanisms carry correctness:
//!
//! 1. the keyword-level compare-and-set in
//!    [`KeywordRepository::claim_if_unclaimed`], which admits exactly one
//!    owner per keyword, and
//! 2. the `(player, keyword)` uniqueness of the discovery log, which makes
//!    [`DiscoveryRepository::record_and_credit`] idempotent.
//!
//! Reading the keyword before the compare-and-set only saves a round trip.
//! When the caller already owns the keyword the protocol still attempts to
//! record the discovery, so a claim interrupted between the two writes is
//! completed on the next attempt.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    ClaimCommand, ClaimKeywordRequest, ConditionalUpdate, DiscoveryRepository, KeywordRepository,
    PlayerRepository, RecordOutcome,
};
use crate::domain::repository_error_mapping::{
    map_discovery_error, map_keyword_error, map_player_error,
};
use crate::domain::{ClaimOutcome, Discovery, Error, Keyword, KeywordId, PlayerId};

/// Claim service implementing [`ClaimCommand`].
#[derive(Clone)]
pub struct ClaimService<K, D, P> {
    keywords: Arc<K>,
    discoveries: Arc<D>,
    players: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<K, D, P> ClaimService<K, D, P> {
    pub fn new(
        keywords: Arc<K>,
        discoveries: Arc<D>,
        players: Arc<P>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            keywords,
            discoveries,
            players,
            clock,
        }
    }
}

impl<K, D, P> ClaimService<K, D, P>
where
    K: KeywordRepository,
    D: DiscoveryRepository,
    P: PlayerRepository,
{
    async fn load_keyword(&self, id: &KeywordId) -> Result<Keyword, Error> {
        self.keywords
            .find_by_id(id)
            .await
            .map_err(map_keyword_error)?
            .ok_or_else(|| Error::not_found(format!("keyword {id} not found")))
    }

    async fn ensure_player(&self, id: &PlayerId) -> Result<(), Error> {
        let found = self
            .players
            .find_by_id(id)
            .await
            .map_err(map_player_error)?;
        match found {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("player {id} not found"))),
        }
    }

    /// Run the compare-and-set and report who owns the keyword afterwards.
    async fn acquire(&self, keyword: &Keyword, player_id: PlayerId) -> Result<PlayerId, Error> {
        let update = self
            .keywords
            .claim_if_unclaimed(&keyword.id(), &player_id, self.clock.utc())
            .await
            .map_err(map_keyword_error)?;

        match update {
            ConditionalUpdate::Applied => Ok(player_id),
            ConditionalUpdate::Rejected => {
                debug!(keyword_id = %keyword.id(), "lost keyword claim race; re-reading owner");
                let current = self.load_keyword(&keyword.id()).await?;
                current.claimed_by().ok_or_else(|| {
                    Error::internal(format!(
                        "keyword {} rejected the claim but has no owner",
                        keyword.id()
                    ))
                })
            }
        }
    }

    async fn claimer_name(&self, owner: &PlayerId) -> Result<Option<String>, Error> {
        let player = self
            .players
            .find_by_id(owner)
            .await
            .map_err(map_player_error)?;
        Ok(player.map(|player| player.name().to_string()))
    }

    async fn record(&self, keyword: &Keyword, player_id: PlayerId) -> Result<ClaimOutcome, Error> {
        let discovery = Discovery {
            player_id,
            keyword_id: keyword.id(),
            discovered_at: self.clock.utc(),
        };
        let outcome = self
            .discoveries
            .record_and_credit(&discovery, keyword.points())
            .await
            .map_err(map_discovery_error)?;

        match outcome {
            RecordOutcome::Recorded { total_points } => {
                info!(
                    keyword_id = %keyword.id(),
                    player_id = %player_id,
                    points = keyword.points(),
                    total_points,
                    "keyword claimed"
                );
                Ok(ClaimOutcome::FreshClaim {
                    word: keyword.word().to_owned(),
                    points: keyword.points(),
                    total_points,
                })
            }
            RecordOutcome::Duplicate => Ok(ClaimOutcome::AlreadyClaimedBySelf),
        }
    }
}

#[async_trait]
impl<K, D, P> ClaimCommand for ClaimService<K, D, P>
where
    K: KeywordRepository,
    D: DiscoveryRepository,
    P: PlayerRepository,
{
    async fn claim(&self, request: ClaimKeywordRequest) -> Result<ClaimOutcome, Error> {
        let ClaimKeywordRequest {
            keyword_id,
            player_id,
        } = request;

        self.ensure_player(&player_id).await?;
        let keyword = self.load_keyword(&keyword_id).await?;

        let owner = match keyword.claimed_by() {
            Some(owner) => owner,
            None => self.acquire(&keyword, player_id).await?,
        };

        if owner != player_id {
            let claimer_name = self.claimer_name(&owner).await?;
            return Ok(ClaimOutcome::ClaimedByOther { claimer_name });
        }

        self.record(&keyword, player_id).await
    }
}

#[cfg(test)]
#[path = "claim_service_tests.rs"]
mod tests;
