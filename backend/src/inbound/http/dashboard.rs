//! Dashboard handler.

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{Dashboard, DashboardKeyword, Finder, Progress, ViewerDiscovery};
use crate::domain::{Error, KeywordSize};
use crate::inbound::http::ApiResult;
use crate::inbound::http::leaderboard::LeaderboardEntryResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinderResponse {
    pub player_name: String,
    pub discovered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKeywordResponse {
    pub id: Uuid,
    pub word: String,
    pub points: u32,
    pub size: KeywordSize,
    pub is_found: bool,
    pub found_by_viewer: bool,
    pub finders: Vec<FinderResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewerDiscoveryResponse {
    pub keyword_id: Uuid,
    pub discovered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub found: usize,
    pub total: usize,
    pub percent: u32,
}

/// Dashboard payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub player_name: String,
    /// Cached total; may lag behind the leaderboard.
    pub total_points: u32,
    pub keywords: Vec<DashboardKeywordResponse>,
    pub my_discoveries: Vec<ViewerDiscoveryResponse>,
    pub progress: ProgressResponse,
    pub leaderboard: Vec<LeaderboardEntryResponse>,
}

impl From<Finder> for FinderResponse {
    fn from(finder: Finder) -> Self {
        Self {
            player_name: finder.player_name,
            discovered_at: finder.discovered_at,
        }
    }
}

impl From<DashboardKeyword> for DashboardKeywordResponse {
    fn from(keyword: DashboardKeyword) -> Self {
        Self {
            id: *keyword.keyword_id.as_uuid(),
            word: keyword.word,
            points: keyword.points,
            size: keyword.size,
            is_found: keyword.is_found,
            found_by_viewer: keyword.found_by_viewer,
            finders: keyword.finders.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ViewerDiscovery> for ViewerDiscoveryResponse {
    fn from(discovery: ViewerDiscovery) -> Self {
        Self {
            keyword_id: *discovery.keyword_id.as_uuid(),
            discovered_at: discovery.discovered_at,
        }
    }
}

impl From<Progress> for ProgressResponse {
    fn from(progress: Progress) -> Self {
        Self {
            found: progress.found,
            total: progress.total,
            percent: progress.percent,
        }
    }
}

fn to_response(view: Dashboard, player_name: String, total_points: u32) -> DashboardResponse {
    DashboardResponse {
        player_name,
        total_points,
        keywords: view.keywords.into_iter().map(Into::into).collect(),
        my_discoveries: view
            .viewer_discoveries
            .into_iter()
            .map(Into::into)
            .collect(),
        progress: view.progress.into(),
        leaderboard: view.leaderboard.into_iter().map(Into::into).collect(),
    }
}

/// Keywords with their finders, the caller's progress, and the leaderboard.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 401, description = "No identity; go to /setup", body = Error),
        (status = 503, description = "Data store unavailable", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    let identity = session.require_identity()?;
    let view = state.dashboard.dashboard(identity.id).await?;
    Ok(web::Json(to_response(
        view,
        identity.name,
        identity.total_points,
    )))
}
