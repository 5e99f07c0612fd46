//! Read-only keyword reveal shown after scanning a QR code.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{KeywordRepository, KeywordReveal, KeywordRevealQuery, PlayerRepository};
use crate::domain::repository_error_mapping::{map_keyword_error, map_player_error};
use crate::domain::{Error, KeywordId, KeywordStatus, PlayerId};

/// Reveal service implementing [`KeywordRevealQuery`].
#[derive(Clone)]
pub struct KeywordRevealService<K, P> {
    keywords: Arc<K>,
    players: Arc<P>,
}

impl<K, P> KeywordRevealService<K, P> {
    pub fn new(keywords: Arc<K>, players: Arc<P>) -> Self {
        Self { keywords, players }
    }
}

#[async_trait]
impl<K, P> KeywordRevealQuery for KeywordRevealService<K, P>
where
    K: KeywordRepository,
    P: PlayerRepository,
{
    async fn reveal(
        &self,
        keyword_id: KeywordId,
        viewer: PlayerId,
    ) -> Result<KeywordReveal, Error> {
        let keyword = self
            .keywords
            .find_by_id(&keyword_id)
            .await
            .map_err(map_keyword_error)?
            .ok_or_else(|| Error::not_found(format!("keyword {keyword_id} not found")))?;

        let status = match keyword.claimed_by() {
            None => KeywordStatus::Available,
            Some(owner) if owner == viewer => KeywordStatus::ClaimedBySelf,
            Some(owner) => {
                let claimer = self
                    .players
                    .find_by_id(&owner)
                    .await
                    .map_err(map_player_error)?;
                KeywordStatus::ClaimedByOther {
                    claimer_name: claimer.map(|player| player.name().to_string()),
                }
            }
        };

        Ok(KeywordReveal {
            keyword_id,
            word: keyword.word().to_owned(),
            points: keyword.points(),
            size: keyword.size(),
            status,
        })
    }
}
