//! Keyword reveal and claim handlers.
//!
//! ```text
//! GET  /api/v1/keywords/{id}
//! POST /api/v1/keywords/{id}/claim
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{ClaimKeywordRequest, KeywordReveal};
use crate::domain::{ClaimOutcome, Error, KeywordId, KeywordSize, KeywordStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Reveal view of a scanned keyword.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRevealResponse {
    pub id: Uuid,
    pub word: String,
    pub points: u32,
    pub size: KeywordSize,
    /// Display label of the size tier, e.g. `"Small (hard)"`.
    pub size_label: String,
    pub status: KeywordStatus,
}

impl From<KeywordReveal> for KeywordRevealResponse {
    fn from(reveal: KeywordReveal) -> Self {
        Self {
            id: *reveal.keyword_id.as_uuid(),
            word: reveal.word,
            points: reveal.points,
            size: reveal.size,
            size_label: reveal.size.label().to_owned(),
            status: reveal.status,
        }
    }
}

/// Show a keyword and whether the caller can still claim it.
#[utoipa::path(
    get,
    path = "/api/v1/keywords/{id}",
    params(("id" = Uuid, Path, description = "Keyword identifier")),
    responses(
        (status = 200, description = "Keyword details", body = KeywordRevealResponse),
        (status = 401, description = "No identity; go to /setup", body = Error),
        (status = 404, description = "Unknown keyword", body = Error),
        (status = 503, description = "Data store unavailable", body = Error)
    ),
    tags = ["keywords"],
    operation_id = "revealKeyword"
)]
#[get("/keywords/{id}")]
pub async fn reveal_keyword(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<KeywordRevealResponse>> {
    let identity = session.require_identity()?;
    let keyword_id = KeywordId::from_uuid(path.into_inner());
    let reveal = state.reveal.reveal(keyword_id, identity.id).await?;
    Ok(web::Json(reveal.into()))
}

/// Claim a keyword for the caller.
///
/// Every outcome of the protocol is a `200`; the body says whether points
/// were credited. On a fresh claim the cached identity is refreshed with the
/// authoritative total.
#[utoipa::path(
    post,
    path = "/api/v1/keywords/{id}/claim",
    params(("id" = Uuid, Path, description = "Keyword identifier")),
    responses(
        (status = 200, description = "Claim outcome", body = ClaimOutcome),
        (status = 401, description = "No identity; go to /setup", body = Error),
        (status = 404, description = "Unknown keyword or player", body = Error),
        (status = 503, description = "Data store unavailable; retry", body = Error)
    ),
    tags = ["keywords"],
    operation_id = "claimKeyword"
)]
#[post("/keywords/{id}/claim")]
pub async fn claim_keyword(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ClaimOutcome>> {
    let identity = session.require_identity()?;
    let request = ClaimKeywordRequest {
        keyword_id: KeywordId::from_uuid(path.into_inner()),
        player_id: identity.id,
    };
    let outcome = state.claims.claim(request).await?;
    if let ClaimOutcome::FreshClaim { total_points, .. } = &outcome {
        session.save(&identity.with_total_points(*total_points))?;
    }
    Ok(web::Json(outcome))
}

#[cfg(test)]
#[path = "keywords_tests.rs"]
mod tests;
