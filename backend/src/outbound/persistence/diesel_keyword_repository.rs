//! PostgreSQL-backed `KeywordRepository`.
//!
//! The claim is a single `UPDATE ... WHERE claimed_by_player_id IS NULL`, so
//! PostgreSQL's row lock arbitrates concurrent claimants.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ConditionalUpdate, KeywordRepository, KeywordRepositoryError};
use crate::domain::{Keyword, KeywordClaim, KeywordDraft, KeywordId, KeywordSize, PlayerId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{KeywordRow, NewKeywordRow};
use super::pool::{DbPool, PoolError};
use super::schema::keywords;

/// Diesel-backed implementation of [`KeywordRepository`].
#[derive(Clone)]
pub struct DieselKeywordRepository {
    pool: DbPool,
}

impl DieselKeywordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> KeywordRepositoryError {
    map_pool_error(error, KeywordRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> KeywordRepositoryError {
    map_diesel_error(
        error,
        KeywordRepositoryError::query,
        KeywordRepositoryError::connection,
    )
}

fn row_to_keyword(row: KeywordRow) -> Result<Keyword, KeywordRepositoryError> {
    let corrupt = |detail: String| {
        KeywordRepositoryError::query(format!("invalid keyword {} in database: {detail}", row.id))
    };

    let points = u32::try_from(row.points).map_err(|_| corrupt(format!("points {}", row.points)))?;
    let size = row
        .size
        .parse::<KeywordSize>()
        .map_err(|err| corrupt(err.to_string()))?;
    let claim = match (row.claimed_by_player_id, row.claimed_at) {
        (Some(player_id), Some(claimed_at)) => Some(KeywordClaim {
            player_id: PlayerId::from_uuid(player_id),
            claimed_at,
        }),
        (None, _) => None,
        (Some(_), None) => return Err(corrupt("claim without timestamp".to_owned())),
    };

    Keyword::new(KeywordDraft {
        id: KeywordId::from_uuid(row.id),
        word: row.word.clone(),
        points,
        size,
        is_found: row.is_found,
        found_at: row.found_at,
        claim,
    })
    .map_err(|err| corrupt(err.to_string()))
}

#[async_trait]
impl KeywordRepository for DieselKeywordRepository {
    async fn find_by_id(&self, id: &KeywordId) -> Result<Option<Keyword>, KeywordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<KeywordRow> = keywords::table
            .find(id.as_uuid())
            .select(KeywordRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(row_to_keyword).transpose()
    }

    async fn list_by_points_desc(&self) -> Result<Vec<Keyword>, KeywordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<KeywordRow> = keywords::table
            .order((keywords::points.desc(), keywords::word.asc()))
            .select(KeywordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows.into_iter().map(row_to_keyword).collect()
    }

    async fn claim_if_unclaimed(
        &self,
        id: &KeywordId,
        player_id: &PlayerId,
        at: DateTime<Utc>,
    ) -> Result<ConditionalUpdate, KeywordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let updated = diesel::update(
            keywords::table
                .filter(keywords::id.eq(id.as_uuid()))
                .filter(keywords::claimed_by_player_id.is_null()),
        )
        .set((
            keywords::claimed_by_player_id.eq(Some(*player_id.as_uuid())),
            keywords::claimed_at.eq(Some(at)),
            keywords::is_found.eq(true),
            keywords::found_at.eq(Some(at)),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        Ok(if updated == 1 {
            ConditionalUpdate::Applied
        } else {
            ConditionalUpdate::Rejected
        })
    }

    async fn seed(&self, keywords: &[Keyword]) -> Result<usize, KeywordRepositoryError> {
        if keywords.is_empty() {
            return Ok(0);
        }
        let rows = keywords
            .iter()
            .map(|keyword| {
                let points = i32::try_from(keyword.points())
                    .map_err(|_| KeywordRepositoryError::query("keyword points out of range"))?;
                Ok(NewKeywordRow {
                    id: *keyword.id().as_uuid(),
                    word: keyword.word(),
                    points,
                    size: keyword.size().as_str(),
                    is_found: keyword.is_found(),
                    found_at: keyword.found_at(),
                    claimed_by_player_id: keyword.claimed_by().map(|id| *id.as_uuid()),
                    claimed_at: keyword.claim().map(|claim| claim.claimed_at),
                })
            })
            .collect::<Result<Vec<_>, KeywordRepositoryError>>()?;

        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::insert_into(keywords::table)
            .values(&rows)
            .on_conflict(keywords::id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel)
    }
}
