//! Discovery log entries.
//!
//! A discovery records that a player found a keyword. At most one discovery
//! exists per (player, keyword) pair.

use chrono::{DateTime, Utc};

use super::{KeywordId, PlayerId};

/// A player's personal record of finding a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discovery {
    pub player_id: PlayerId,
    pub keyword_id: KeywordId,
    pub discovered_at: DateTime<Utc>,
}

/// Discovery joined with the finder's display name for read models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDiscovery {
    pub discovery: Discovery,
    pub player_name: String,
}
