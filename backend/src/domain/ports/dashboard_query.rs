//! Driving port for the player dashboard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, KeywordId, KeywordSize, PlayerId};

use super::LeaderboardEntry;

/// A finder of a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finder {
    pub player_name: String,
    pub discovered_at: DateTime<Utc>,
}

/// Keyword row on the dashboard with everyone who found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardKeyword {
    pub keyword_id: KeywordId,
    pub word: String,
    pub points: u32,
    pub size: KeywordSize,
    pub is_found: bool,
    pub found_by_viewer: bool,
    pub finders: Vec<Finder>,
}

/// The viewer's own discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerDiscovery {
    pub keyword_id: KeywordId,
    pub discovered_at: DateTime<Utc>,
}

/// Share of keywords found by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub found: usize,
    pub total: usize,
    /// Integer percentage, `0` when there are no keywords.
    pub percent: u32,
}

impl Progress {
    pub fn new(found: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            u32::try_from(found.saturating_mul(100) / total).unwrap_or(100)
        };
        Self {
            found,
            total,
            percent,
        }
    }
}

/// Full dashboard read model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub keywords: Vec<DashboardKeyword>,
    pub viewer_discoveries: Vec<ViewerDiscovery>,
    pub progress: Progress,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Driving port for the dashboard view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    async fn dashboard(&self, viewer: PlayerId) -> Result<Dashboard, Error>;
}
