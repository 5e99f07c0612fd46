//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod dashboard;
pub mod error;
pub mod health;
pub mod keywords;
pub mod leaderboard;
pub mod players;
pub mod qr_sheet;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Callers mount this inside a scope wrapped with the session middleware and
/// provide [`state::HttpState`] as app data.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(players::setup_player)
        .service(players::confirm_player)
        .service(players::current_player)
        .service(players::logout)
        .service(keywords::reveal_keyword)
        .service(keywords::claim_keyword)
        .service(dashboard::dashboard)
        .service(leaderboard::leaderboard)
        .service(qr_sheet::qr_sheet);
}
