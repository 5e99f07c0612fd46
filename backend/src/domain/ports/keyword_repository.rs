//! Port for keyword reads and the exclusive claim update.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Keyword, KeywordId, PlayerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by keyword repository adapters.
    pub enum KeywordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "keyword repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "keyword repository query failed: {message}",
    }
}

/// Result of a compare-and-set update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalUpdate {
    /// The predicate held and the row was updated.
    Applied,
    /// The predicate did not hold (or the row is gone); nothing was written.
    Rejected,
}

/// Port for keyword state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeywordRepository: Send + Sync {
    /// Find a keyword by id.
    async fn find_by_id(&self, id: &KeywordId) -> Result<Option<Keyword>, KeywordRepositoryError>;

    /// List every keyword, highest points first.
    async fn list_by_points_desc(&self) -> Result<Vec<Keyword>, KeywordRepositoryError>;

    /// Atomically set the claim fields of a keyword only if it is unclaimed.
    ///
    /// Sets `claimed_by_player_id`, `claimed_at`, `is_found` and `found_at`
    /// in one row-level compare-and-set. Exactly one concurrent caller
    /// observes [`ConditionalUpdate::Applied`].
    async fn claim_if_unclaimed(
        &self,
        id: &KeywordId,
        player_id: &PlayerId,
        at: DateTime<Utc>,
    ) -> Result<ConditionalUpdate, KeywordRepositoryError>;

    /// Insert operator-provided keywords, skipping ids that already exist.
    ///
    /// Returns the number of keywords written.
    async fn seed(&self, keywords: &[Keyword]) -> Result<usize, KeywordRepositoryError>;
}
