//! Builders for HTTP state over the configured data store.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use hunt::domain::ports::{DiscoveryRepository, KeywordRepository, PlayerRepository};
use hunt::inbound::http::state::{HttpState, HuntRepositories};
use hunt::keyword_seed::seed_keywords_on_startup;
use hunt::outbound::memory::InMemoryStore;
use hunt::outbound::persistence::{
    DieselDiscoveryRepository, DieselKeywordRepository, DieselPlayerRepository,
};

use super::ServerConfig;

/// Seed keywords into the chosen store, then wire the use-case services.
async fn seeded_state<P, K, D>(
    repositories: HuntRepositories<P, K, D>,
    config: &ServerConfig,
) -> std::io::Result<HttpState>
where
    P: PlayerRepository + 'static,
    K: KeywordRepository + 'static,
    D: DiscoveryRepository + 'static,
{
    seed_keywords_on_startup(
        config.keywords_file.as_deref(),
        repositories.keywords.as_ref(),
    )
    .await
    .map_err(std::io::Error::other)?;

    Ok(HttpState::from_repositories(
        repositories,
        Arc::new(DefaultClock),
        config.public_base_url.clone(),
    ))
}

/// Build HTTP state backed by PostgreSQL when a pool is configured,
/// otherwise by a fresh in-memory store.
///
/// # Errors
/// Propagates keyword seeding failures as [`std::io::Error`].
pub(super) async fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "wiring repositories");
            seeded_state(
                HuntRepositories {
                    players: Arc::new(DieselPlayerRepository::new(pool.clone())),
                    keywords: Arc::new(DieselKeywordRepository::new(pool.clone())),
                    discoveries: Arc::new(DieselDiscoveryRepository::new(pool.clone())),
                },
                config,
            )
            .await
        }
        None => {
            info!(store = "memory", "wiring repositories");
            let store = Arc::new(InMemoryStore::new());
            seeded_state(
                HuntRepositories {
                    players: store.clone(),
                    keywords: store.clone(),
                    discoveries: store,
                },
                config,
            )
            .await
        }
    }
}
