//! Port for player persistence and ranking reads.

use async_trait::async_trait;

use crate::domain::{Player, PlayerId, PlayerName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by player repository adapters.
    pub enum PlayerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "player repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "player repository query failed: {message}",
    }
}

/// Result of a unique-constrained insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was written.
    Created,
    /// A row with the same unique key already exists; nothing was written.
    Conflict,
}

/// Port for reading and creating players.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Find a player by id.
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>, PlayerRepositoryError>;

    /// Find a player whose name equals `name` under case folding.
    ///
    /// Adapters compare [`PlayerName::folded`] values rather than folding in
    /// the backing store, whose rules for non-ASCII text may differ.
    async fn find_by_name(&self, name: &PlayerName)
    -> Result<Option<Player>, PlayerRepositoryError>;

    /// Insert a new player, reporting a name collision as
    /// [`InsertOutcome::Conflict`].
    async fn insert(&self, player: &Player) -> Result<InsertOutcome, PlayerRepositoryError>;

    /// Read the highest-scoring players, ties broken by earliest creation.
    async fn list_top(&self, limit: usize) -> Result<Vec<Player>, PlayerRepositoryError>;
}
