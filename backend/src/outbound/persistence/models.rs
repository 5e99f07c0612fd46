//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions to domain types
//! validate stored values and report corrupt rows as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{discoveries, keywords, players};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = players)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlayerRow {
    pub id: Uuid,
    pub name: String,
    pub total_points: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = players)]
pub(crate) struct NewPlayerRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub name_key: String,
    pub total_points: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = keywords)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct KeywordRow {
    pub id: Uuid,
    pub word: String,
    pub points: i32,
    pub size: String,
    pub is_found: bool,
    pub found_at: Option<DateTime<Utc>>,
    pub claimed_by_player_id: Option<Uuid>,
    pub claimed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = keywords)]
pub(crate) struct NewKeywordRow<'a> {
    pub id: Uuid,
    pub word: &'a str,
    pub points: i32,
    pub size: &'a str,
    pub is_found: bool,
    pub found_at: Option<DateTime<Utc>>,
    pub claimed_by_player_id: Option<Uuid>,
    pub claimed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = discoveries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DiscoveryRow {
    pub player_id: Uuid,
    pub keyword_id: Uuid,
    pub discovered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = discoveries)]
pub(crate) struct NewDiscoveryRow {
    pub player_id: Uuid,
    pub keyword_id: Uuid,
    pub discovered_at: DateTime<Utc>,
}
