//! Player setup service.
//!
//! Creates a player for a new name, or surfaces the existing player whose
//! name matches case-insensitively so the caller can confirm reuse.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{InsertOutcome, PlayerRepository, PlayerSetupCommand, SetupOutcome};
use crate::domain::repository_error_mapping::map_player_error;
use crate::domain::{Error, Player, PlayerId, PlayerName};

/// Setup service implementing [`PlayerSetupCommand`].
#[derive(Clone)]
pub struct PlayerSetupService<P> {
    players: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> PlayerSetupService<P> {
    pub fn new(players: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { players, clock }
    }
}

impl<P> PlayerSetupService<P>
where
    P: PlayerRepository,
{
    async fn find_match(&self, name: &PlayerName) -> Result<Option<Player>, Error> {
        self.players
            .find_by_name(name)
            .await
            .map_err(map_player_error)
    }
}

#[async_trait]
impl<P> PlayerSetupCommand for PlayerSetupService<P>
where
    P: PlayerRepository,
{
    async fn begin(&self, name: String) -> Result<SetupOutcome, Error> {
        let name = PlayerName::new(&name).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "name" }))
        })?;

        if let Some(existing) = self.find_match(&name).await? {
            return Ok(SetupOutcome::ExistingMatch(existing));
        }

        let player = Player::new(PlayerId::random(), name, 0, self.clock.utc());
        let inserted = self
            .players
            .insert(&player)
            .await
            .map_err(map_player_error)?;

        match inserted {
            InsertOutcome::Created => {
                info!(player_id = %player.id(), "player created");
                Ok(SetupOutcome::Created(player))
            }
            // A concurrent setup registered the same name between lookup and
            // insert.
            InsertOutcome::Conflict => self
                .find_match(player.name())
                .await?
                .map(SetupOutcome::ExistingMatch)
                .ok_or_else(|| {
                    Error::conflict(format!("player name {} is unavailable", player.name()))
                }),
        }
    }

    async fn use_existing(&self, player_id: PlayerId) -> Result<Player, Error> {
        self.players
            .find_by_id(&player_id)
            .await
            .map_err(map_player_error)?
            .ok_or_else(|| Error::not_found(format!("player {player_id} not found")))
    }
}
