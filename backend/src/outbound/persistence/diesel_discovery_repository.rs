//! PostgreSQL-backed `DiscoveryRepository`.
//!
//! Recording a discovery and crediting the player happen in one transaction:
//! the insert is `ON CONFLICT DO NOTHING` on the `(player_id, keyword_id)` key
//! and the credit is `total_points = total_points + $delta`, so a repeat is
//! detected without raising and concurrent credits never lose an update.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{DiscoveryRepository, DiscoveryRepositoryError, RecordOutcome};
use crate::domain::{Discovery, KeywordId, NamedDiscovery, PlayerId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DiscoveryRow, NewDiscoveryRow};
use super::pool::{DbPool, PoolError};
use super::schema::{discoveries, players};

/// Diesel-backed implementation of [`DiscoveryRepository`].
#[derive(Clone)]
pub struct DieselDiscoveryRepository {
    pool: DbPool,
}

impl DieselDiscoveryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> DiscoveryRepositoryError {
    map_pool_error(error, DiscoveryRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> DiscoveryRepositoryError {
    map_diesel_error(
        error,
        DiscoveryRepositoryError::query,
        DiscoveryRepositoryError::connection,
    )
}

/// Failure inside the record transaction; any variant rolls it back.
#[derive(Debug)]
enum RecordFailure {
    Diesel(diesel::result::Error),
    PlayerMissing,
    TotalOutOfRange(i32),
}

impl From<diesel::result::Error> for RecordFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn row_to_discovery(row: DiscoveryRow) -> Discovery {
    Discovery {
        player_id: PlayerId::from_uuid(row.player_id),
        keyword_id: KeywordId::from_uuid(row.keyword_id),
        discovered_at: row.discovered_at,
    }
}

#[async_trait]
impl DiscoveryRepository for DieselDiscoveryRepository {
    async fn record_and_credit(
        &self,
        discovery: &Discovery,
        points: u32,
    ) -> Result<RecordOutcome, DiscoveryRepositoryError> {
        let delta = i32::try_from(points)
            .map_err(|_| DiscoveryRepositoryError::query("keyword points out of range"))?;
        let row = NewDiscoveryRow {
            player_id: *discovery.player_id.as_uuid(),
            keyword_id: *discovery.keyword_id.as_uuid(),
            discovered_at: discovery.discovered_at,
        };
        let player_uuid = row.player_id;

        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let result = conn
            .transaction::<_, RecordFailure, _>(|conn| {
                async move {
                    let inserted = diesel::insert_into(discoveries::table)
                        .values(&row)
                        .on_conflict((discoveries::player_id, discoveries::keyword_id))
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    if inserted == 0 {
                        return Ok(RecordOutcome::Duplicate);
                    }

                    let total: Option<i32> = diesel::update(players::table.find(player_uuid))
                        .set(players::total_points.eq(players::total_points + delta))
                        .returning(players::total_points)
                        .get_result(conn)
                        .await
                        .optional()?;
                    let total = total.ok_or(RecordFailure::PlayerMissing)?;
                    let total_points =
                        u32::try_from(total).map_err(|_| RecordFailure::TotalOutOfRange(total))?;

                    Ok(RecordOutcome::Recorded { total_points })
                }
                .scope_boxed()
            })
            .await;

        result.map_err(|failure| match failure {
            RecordFailure::Diesel(error) => map_diesel(error),
            RecordFailure::PlayerMissing => {
                DiscoveryRepositoryError::player_missing(discovery.player_id.to_string())
            }
            RecordFailure::TotalOutOfRange(total) => {
                DiscoveryRepositoryError::query(format!("point total out of range: {total}"))
            }
        })
    }

    async fn list_with_player_names(
        &self,
    ) -> Result<Vec<NamedDiscovery>, DiscoveryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<(DiscoveryRow, String)> = discoveries::table
            .inner_join(players::table)
            .order(discoveries::discovered_at.asc())
            .select((DiscoveryRow::as_select(), players::name))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows
            .into_iter()
            .map(|(row, player_name)| NamedDiscovery {
                discovery: row_to_discovery(row),
                player_name,
            })
            .collect())
    }

    async fn list_for_player(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<Discovery>, DiscoveryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<DiscoveryRow> = discoveries::table
            .filter(discoveries::player_id.eq(player_id.as_uuid()))
            .order(discoveries::discovered_at.asc())
            .select(DiscoveryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows.into_iter().map(row_to_discovery).collect())
    }
}
