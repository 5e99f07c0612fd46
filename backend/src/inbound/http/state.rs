//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so they
//! stay testable without a data store.

use std::sync::Arc;

use mockable::Clock;
use url::Url;

use crate::domain::ports::{
    ClaimCommand, DashboardQuery, DiscoveryRepository, KeywordRepository, KeywordRevealQuery,
    LeaderboardQuery, PlayerRepository, PlayerSetupCommand, QrSheetQuery,
};
use crate::domain::{
    ClaimService, DashboardService, KeywordRevealService, LeaderboardService, PlayerSetupService,
    QrSheetService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub setup: Arc<dyn PlayerSetupCommand>,
    pub claims: Arc<dyn ClaimCommand>,
    pub reveal: Arc<dyn KeywordRevealQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub leaderboard: Arc<dyn LeaderboardQuery>,
    pub qr_sheet: Arc<dyn QrSheetQuery>,
}

/// Driven ports the hunt services are built from.
pub struct HuntRepositories<P, K, D> {
    pub players: Arc<P>,
    pub keywords: Arc<K>,
    pub discoveries: Arc<D>,
}

impl HttpState {
    /// Wire every use-case service over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use hunt::inbound::http::state::{HttpState, HuntRepositories};
    /// use hunt::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    /// use url::Url;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(
    ///     HuntRepositories {
    ///         players: store.clone(),
    ///         keywords: store.clone(),
    ///         discoveries: store,
    ///     },
    ///     Arc::new(DefaultClock),
    ///     Url::parse("https://hunt.example.org").expect("valid url"),
    /// );
    /// # let _ = state;
    /// ```
    pub fn from_repositories<P, K, D>(
        repositories: HuntRepositories<P, K, D>,
        clock: Arc<dyn Clock>,
        public_base_url: Url,
    ) -> Self
    where
        P: PlayerRepository + 'static,
        K: KeywordRepository + 'static,
        D: DiscoveryRepository + 'static,
    {
        let HuntRepositories {
            players,
            keywords,
            discoveries,
        } = repositories;

        Self {
            setup: Arc::new(PlayerSetupService::new(players.clone(), clock.clone())),
            claims: Arc::new(ClaimService::new(
                keywords.clone(),
                discoveries.clone(),
                players.clone(),
                clock,
            )),
            reveal: Arc::new(KeywordRevealService::new(keywords.clone(), players.clone())),
            dashboard: Arc::new(DashboardService::new(
                keywords.clone(),
                discoveries,
                players.clone(),
            )),
            leaderboard: Arc::new(LeaderboardService::new(players)),
            qr_sheet: Arc::new(QrSheetService::new(keywords, public_base_url)),
        }
    }
}
