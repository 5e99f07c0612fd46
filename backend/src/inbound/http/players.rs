//! Player setup and identity handlers.
//!
//! ```text
//! POST /api/v1/players/setup {"name":"Ana"}
//! POST /api/v1/players/setup/confirm {"playerId":"…"}
//! GET  /api/v1/players/me
//! POST /api/v1/players/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::SetupOutcome;
use crate::domain::{Error, PlayerId, PlayerIdentity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/players/setup`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetupRequest {
    pub name: String,
}

/// Request body for `POST /api/v1/players/setup/confirm`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub player_id: Uuid,
}

/// Cached player identity as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: Uuid,
    pub name: String,
    pub total_points: u32,
}

impl From<&PlayerIdentity> for PlayerResponse {
    fn from(identity: &PlayerIdentity) -> Self {
        Self {
            id: *identity.id.as_uuid(),
            name: identity.name.clone(),
            total_points: identity.total_points,
        }
    }
}

/// How setup resolved the submitted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SetupResolution {
    /// A new player was created and cached.
    Created,
    /// A player with that name exists; confirm to continue as them.
    ExistingMatch,
}

/// Response body for `POST /api/v1/players/setup`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetupResponse {
    pub outcome: SetupResolution,
    pub player: PlayerResponse,
}

/// Submit a display name.
///
/// A new name creates a player and caches the identity (`201`). A name that
/// matches an existing player case-insensitively returns that player without
/// caching anything (`200`); the client then confirms or picks another name.
#[utoipa::path(
    post,
    path = "/api/v1/players/setup",
    request_body = SetupRequest,
    responses(
        (status = 201, description = "Player created", body = SetupResponse),
        (status = 200, description = "Existing player matches the name", body = SetupResponse),
        (status = 400, description = "Invalid name", body = Error),
        (status = 503, description = "Data store unavailable", body = Error)
    ),
    tags = ["players"],
    operation_id = "setupPlayer"
)]
#[post("/players/setup")]
pub async fn setup_player(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SetupRequest>,
) -> ApiResult<HttpResponse> {
    let SetupRequest { name } = payload.into_inner();
    match state.setup.begin(name).await? {
        SetupOutcome::Created(player) => {
            let identity = player.identity();
            session.save(&identity)?;
            Ok(HttpResponse::Created().json(SetupResponse {
                outcome: SetupResolution::Created,
                player: PlayerResponse::from(&identity),
            }))
        }
        SetupOutcome::ExistingMatch(player) => Ok(HttpResponse::Ok().json(SetupResponse {
            outcome: SetupResolution::ExistingMatch,
            player: PlayerResponse::from(&player.identity()),
        })),
    }
}

/// Continue as an existing player and cache their identity.
#[utoipa::path(
    post,
    path = "/api/v1/players/setup/confirm",
    request_body = ConfirmRequest,
    responses(
        (status = 200, description = "Identity cached", body = PlayerResponse),
        (status = 404, description = "Unknown player", body = Error),
        (status = 503, description = "Data store unavailable", body = Error)
    ),
    tags = ["players"],
    operation_id = "confirmPlayer"
)]
#[post("/players/setup/confirm")]
pub async fn confirm_player(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ConfirmRequest>,
) -> ApiResult<web::Json<PlayerResponse>> {
    let player_id = PlayerId::from_uuid(payload.player_id);
    let identity = state.setup.use_existing(player_id).await?.identity();
    session.save(&identity)?;
    Ok(web::Json(PlayerResponse::from(&identity)))
}

/// Cached identity for the home view.
#[utoipa::path(
    get,
    path = "/api/v1/players/me",
    responses(
        (status = 200, description = "Cached identity", body = PlayerResponse),
        (status = 401, description = "No identity; go to /setup", body = Error)
    ),
    tags = ["players"],
    operation_id = "currentPlayer"
)]
#[get("/players/me")]
pub async fn current_player(session: SessionContext) -> ApiResult<web::Json<PlayerResponse>> {
    let identity = session.require_identity()?;
    Ok(web::Json(PlayerResponse::from(&identity)))
}

/// Forget the cached identity.
#[utoipa::path(
    post,
    path = "/api/v1/players/logout",
    responses((status = 204, description = "Identity cleared")),
    tags = ["players"],
    operation_id = "logout"
)]
#[post("/players/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
#[path = "players_tests.rs"]
mod tests;
