//! Driving port for revealing a scanned keyword.

use async_trait::async_trait;

use crate::domain::{Error, KeywordId, KeywordSize, KeywordStatus, PlayerId};

/// Keyword details as seen by one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordReveal {
    pub keyword_id: KeywordId,
    pub word: String,
    pub points: u32,
    pub size: KeywordSize,
    pub status: KeywordStatus,
}

/// Driving port for the read-only reveal view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeywordRevealQuery: Send + Sync {
    async fn reveal(
        &self,
        keyword_id: KeywordId,
        viewer: PlayerId,
    ) -> Result<KeywordReveal, Error>;
}
