//! Driving port for player setup.
//!
//! Setup either creates a fresh player or surfaces an existing player with a
//! case-insensitively matching name so the caller can confirm reuse.

use async_trait::async_trait;

use crate::domain::{Error, Player, PlayerId};

/// Result of submitting a name at setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// A new player with zero points was created.
    Created(Player),
    /// A player with the same name already exists; nothing was written.
    ExistingMatch(Player),
}

/// Driving port for setup operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerSetupCommand: Send + Sync {
    /// Validate `name` and create a player unless one already matches it.
    async fn begin(&self, name: String) -> Result<SetupOutcome, Error>;

    /// Load an existing player the caller has chosen to continue as.
    async fn use_existing(&self, player_id: PlayerId) -> Result<Player, Error>;
}
