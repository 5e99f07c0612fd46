//! Mapping from driven-port errors to domain errors shared by the services.
//!
//! Connection failures are transient and map to `service_unavailable`; query
//! failures map to `internal`.

use crate::domain::Error;
use crate::domain::ports::{DiscoveryRepositoryError, KeywordRepositoryError, PlayerRepositoryError};

pub(crate) fn map_player_error(error: PlayerRepositoryError) -> Error {
    match error {
        PlayerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("player repository unavailable: {message}"))
        }
        PlayerRepositoryError::Query { message } => {
            Error::internal(format!("player repository error: {message}"))
        }
    }
}

pub(crate) fn map_keyword_error(error: KeywordRepositoryError) -> Error {
    match error {
        KeywordRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("keyword repository unavailable: {message}"))
        }
        KeywordRepositoryError::Query { message } => {
            Error::internal(format!("keyword repository error: {message}"))
        }
    }
}

pub(crate) fn map_discovery_error(error: DiscoveryRepositoryError) -> Error {
    match error {
        DiscoveryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("discovery repository unavailable: {message}"))
        }
        DiscoveryRepositoryError::Query { message } => {
            Error::internal(format!("discovery repository error: {message}"))
        }
        DiscoveryRepositoryError::PlayerMissing { player_id } => {
            Error::not_found(format!("player {player_id} not found"))
        }
    }
}
