//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: define the scavenger hunt model (players, keywords, discoveries)
//! and the services behind the driving ports. Everything here is transport
//! agnostic; inbound adapters translate to HTTP and outbound adapters to the
//! data store.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Player, Keyword, Discovery: the persisted entities.
//! - ClaimService: the at-most-once keyword claim protocol.
//! - PlayerSetupService, LeaderboardService, KeywordRevealService,
//!   DashboardService, QrSheetService: the remaining use-cases.

pub mod claim;
pub mod claim_service;
pub mod dashboard_service;
pub mod discovery;
pub mod error;
pub mod keyword;
pub mod keyword_reveal_service;
pub mod leaderboard;
pub mod player;
pub mod player_setup_service;
pub mod ports;
pub mod qr_sheet;
mod repository_error_mapping;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;

pub use self::claim::{ClaimOutcome, KeywordStatus};
pub use self::claim_service::ClaimService;
pub use self::dashboard_service::DashboardService;
pub use self::discovery::{Discovery, NamedDiscovery};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::keyword::{
    Keyword, KeywordClaim, KeywordDraft, KeywordId, KeywordSize, KeywordValidationError,
};
pub use self::keyword_reveal_service::KeywordRevealService;
pub use self::leaderboard::{LEADERBOARD_LIMIT, LeaderboardService, rank_players};
pub use self::player::{
    PLAYER_NAME_MAX, PLAYER_NAME_MIN, Player, PlayerId, PlayerIdentity, PlayerName,
    PlayerValidationError,
};
pub use self::player_setup_service::PlayerSetupService;
pub use self::qr_sheet::{QrCodeRegistry, QrCodeSpec, QrSheet, QrSheetService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use hunt::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("keyword not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
