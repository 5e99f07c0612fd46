//! Driving port for claiming keywords.

use async_trait::async_trait;

use crate::domain::{ClaimOutcome, Error, KeywordId, PlayerId};

/// Request to claim a keyword on behalf of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimKeywordRequest {
    pub keyword_id: KeywordId,
    pub player_id: PlayerId,
}

/// Driving port for the at-most-once claim protocol.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimCommand: Send + Sync {
    /// Credit the player for the keyword at most once.
    ///
    /// Returns `Err` with [`crate::domain::ErrorCode::NotFound`] when the
    /// keyword does not exist. Losing a race or repeating a claim is reported
    /// through [`ClaimOutcome`], never as an error.
    async fn claim(&self, request: ClaimKeywordRequest) -> Result<ClaimOutcome, Error>;
}
