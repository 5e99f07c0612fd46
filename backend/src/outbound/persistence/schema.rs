//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered players.
    ///
    /// `name_key` holds the case-folded name and is unique.
    players (id) {
        id -> Uuid,
        name -> Varchar,
        name_key -> Varchar,
        total_points -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Operator-seeded keywords and their claim state.
    keywords (id) {
        id -> Uuid,
        word -> Text,
        points -> Int4,
        /// One of `small`, `medium`, `large`.
        size -> Varchar,
        is_found -> Bool,
        found_at -> Nullable<Timestamptz>,
        claimed_by_player_id -> Nullable<Uuid>,
        claimed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Per-player discovery log, unique on `(player_id, keyword_id)`.
    discoveries (player_id, keyword_id) {
        player_id -> Uuid,
        keyword_id -> Uuid,
        discovered_at -> Timestamptz,
    }
}

diesel::joinable!(discoveries -> players (player_id));
diesel::joinable!(discoveries -> keywords (keyword_id));
diesel::joinable!(keywords -> players (claimed_by_player_id));

diesel::allow_tables_to_appear_in_same_query!(players, keywords, discoveries);
