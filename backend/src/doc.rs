//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the response schemas and the session cookie security scheme. The
//! document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ClaimOutcome, Error, ErrorCode, KeywordSize, KeywordStatus};
use crate::inbound::http::dashboard::{
    DashboardKeywordResponse, DashboardResponse, FinderResponse, ProgressResponse,
    ViewerDiscoveryResponse,
};
use crate::inbound::http::keywords::KeywordRevealResponse;
use crate::inbound::http::leaderboard::LeaderboardEntryResponse;
use crate::inbound::http::players::{
    ConfirmRequest, PlayerResponse, SetupRequest, SetupResolution, SetupResponse,
};
use crate::inbound::http::qr_sheet::{QrCodeResponse, QrSheetResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private cookie holding the player identity, issued by POST /api/v1/players/setup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Scavenger hunt API",
        description = "Player setup, keyword claims, dashboard and leaderboard for a QR scavenger hunt."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::players::setup_player,
        crate::inbound::http::players::confirm_player,
        crate::inbound::http::players::current_player,
        crate::inbound::http::players::logout,
        crate::inbound::http::keywords::reveal_keyword,
        crate::inbound::http::keywords::claim_keyword,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::leaderboard::leaderboard,
        crate::inbound::http::qr_sheet::qr_sheet,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ClaimOutcome,
        KeywordStatus,
        KeywordSize,
        SetupRequest,
        ConfirmRequest,
        SetupResolution,
        SetupResponse,
        PlayerResponse,
        KeywordRevealResponse,
        DashboardResponse,
        DashboardKeywordResponse,
        FinderResponse,
        ViewerDiscoveryResponse,
        ProgressResponse,
        LeaderboardEntryResponse,
        QrSheetResponse,
        QrCodeResponse,
    )),
    tags(
        (name = "players", description = "Player setup and the cached identity"),
        (name = "keywords", description = "Revealing and claiming scanned keywords"),
        (name = "dashboard", description = "Per-player progress view"),
        (name = "leaderboard", description = "Public ranking"),
        (name = "operator", description = "Printing QR codes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
