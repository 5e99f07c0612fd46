//! PostgreSQL-backed `PlayerRepository`.
//!
//! Names are matched on `name_key`, the folded form produced by
//! [`PlayerName::folded`], so lookups agree with the in-memory store and
//! with the unique index that guards inserts.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{InsertOutcome, PlayerRepository, PlayerRepositoryError};
use crate::domain::{Player, PlayerId, PlayerName};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewPlayerRow, PlayerRow};
use super::pool::{DbPool, PoolError};
use super::schema::players;

/// Diesel-backed implementation of [`PlayerRepository`].
#[derive(Clone)]
pub struct DieselPlayerRepository {
    pool: DbPool,
}

impl DieselPlayerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> PlayerRepositoryError {
    map_pool_error(error, PlayerRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> PlayerRepositoryError {
    map_diesel_error(
        error,
        PlayerRepositoryError::query,
        PlayerRepositoryError::connection,
    )
}

pub(crate) fn row_to_player(row: PlayerRow) -> Result<Player, PlayerRepositoryError> {
    let name = PlayerName::new(&row.name).map_err(|err| {
        PlayerRepositoryError::query(format!("invalid player name in database: {err}"))
    })?;
    let total_points = u32::try_from(row.total_points).map_err(|_| {
        PlayerRepositoryError::query(format!(
            "negative point total in database: {}",
            row.total_points
        ))
    })?;
    Ok(Player::new(
        PlayerId::from_uuid(row.id),
        name,
        total_points,
        row.created_at,
    ))
}

#[async_trait]
impl PlayerRepository for DieselPlayerRepository {
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<PlayerRow> = players::table
            .find(id.as_uuid())
            .select(PlayerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(row_to_player).transpose()
    }

    async fn find_by_name(
        &self,
        name: &PlayerName,
    ) -> Result<Option<Player>, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<PlayerRow> = players::table
            .filter(players::name_key.eq(name.folded()))
            .select(PlayerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(row_to_player).transpose()
    }

    async fn insert(&self, player: &Player) -> Result<InsertOutcome, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let total_points = i32::try_from(player.total_points())
            .map_err(|_| PlayerRepositoryError::query("point total exceeds storage range"))?;
        let row = NewPlayerRow {
            id: *player.id().as_uuid(),
            name: player.name().as_ref(),
            name_key: player.name().folded(),
            total_points,
            created_at: player.created_at(),
        };

        match diesel::insert_into(players::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(error) if is_unique_violation(&error) => Ok(InsertOutcome::Conflict),
            Err(error) => Err(map_diesel(error)),
        }
    }

    async fn list_top(&self, limit: usize) -> Result<Vec<Player>, PlayerRepositoryError> {
        let limit = i64::try_from(limit)
            .map_err(|_| PlayerRepositoryError::query("leaderboard limit out of range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<PlayerRow> = players::table
            .order((players::total_points.desc(), players::created_at.asc()))
            .limit(limit)
            .select(PlayerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows.into_iter().map(row_to_player).collect()
    }
}
