//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports describe how the domain reaches the data store. Each exposes
//! a typed error generated by [`define_port_error!`] so adapters map their
//! failures into predictable variants. Driving ports are the use-cases that
//! inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod claim_command;
mod dashboard_query;
mod discovery_repository;
mod keyword_repository;
mod keyword_reveal_query;
mod leaderboard_query;
mod player_repository;
mod player_setup_command;
mod qr_sheet_query;

pub use claim_command::{ClaimCommand, ClaimKeywordRequest};
#[cfg(test)]
pub use claim_command::MockClaimCommand;
pub use dashboard_query::{
    Dashboard, DashboardKeyword, DashboardQuery, Finder, Progress, ViewerDiscovery,
};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use discovery_repository::{DiscoveryRepository, DiscoveryRepositoryError, RecordOutcome};
#[cfg(test)]
pub use discovery_repository::MockDiscoveryRepository;
pub use keyword_repository::{ConditionalUpdate, KeywordRepository, KeywordRepositoryError};
#[cfg(test)]
pub use keyword_repository::MockKeywordRepository;
pub use keyword_reveal_query::{KeywordReveal, KeywordRevealQuery};
#[cfg(test)]
pub use keyword_reveal_query::MockKeywordRevealQuery;
pub use leaderboard_query::{LeaderboardEntry, LeaderboardQuery};
#[cfg(test)]
pub use leaderboard_query::MockLeaderboardQuery;
pub use player_repository::{InsertOutcome, PlayerRepository, PlayerRepositoryError};
#[cfg(test)]
pub use player_repository::MockPlayerRepository;
pub use player_setup_command::{PlayerSetupCommand, SetupOutcome};
#[cfg(test)]
pub use player_setup_command::MockPlayerSetupCommand;
pub use qr_sheet_query::QrSheetQuery;
#[cfg(test)]
pub use qr_sheet_query::MockQrSheetQuery;
