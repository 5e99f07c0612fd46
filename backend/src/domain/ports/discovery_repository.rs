//! Port for the per-player discovery log and point crediting.

use async_trait::async_trait;

use crate::domain::{Discovery, NamedDiscovery, PlayerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by discovery repository adapters.
    pub enum DiscoveryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "discovery repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "discovery repository query failed: {message}",
        /// The credited player does not exist.
        PlayerMissing { player_id: String } =>
            "player {player_id} does not exist",
    }
}

/// Result of recording a discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The discovery was written and the player credited; carries the new total.
    Recorded { total_points: u32 },
    /// The player already holds a discovery for this keyword; nothing changed.
    Duplicate,
}

/// Port for recording discoveries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscoveryRepository: Send + Sync {
    /// Insert the discovery and add `points` to the player's total as one
    /// atomic unit.
    ///
    /// The increment is applied as a delta by the store, so concurrent credits
    /// for the same player never lose an update.
    async fn record_and_credit(
        &self,
        discovery: &Discovery,
        points: u32,
    ) -> Result<RecordOutcome, DiscoveryRepositoryError>;

    /// Every discovery with the finder's name, oldest first.
    async fn list_with_player_names(&self) -> Result<Vec<NamedDiscovery>, DiscoveryRepositoryError>;

    /// Discoveries made by one player, oldest first.
    async fn list_for_player(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<Discovery>, DiscoveryRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn player_missing_names_the_player() {
        let id = PlayerId::random();
        let err = DiscoveryRepositoryError::player_missing(id.to_string());
        assert!(err.to_string().contains(&id.to_string()));
    }
}
