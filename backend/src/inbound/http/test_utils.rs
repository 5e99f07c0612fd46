//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use url::Url;

use crate::domain::ports::{
    MockClaimCommand, MockDashboardQuery, MockKeywordRevealQuery, MockLeaderboardQuery,
    MockPlayerSetupCommand, MockQrSheetQuery,
};
use crate::domain::test_fixtures::fixture_clock;
use crate::inbound::http::state::{HttpState, HuntRepositories};
use crate::outbound::memory::InMemoryStore;

/// Session cookie name used by the server and the tests.
pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Disables the `Secure` flag for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// One mock per driving port; unset expectations fail the test when hit.
#[derive(Default)]
pub struct MockPorts {
    pub setup: MockPlayerSetupCommand,
    pub claims: MockClaimCommand,
    pub reveal: MockKeywordRevealQuery,
    pub dashboard: MockDashboardQuery,
    pub leaderboard: MockLeaderboardQuery,
    pub qr_sheet: MockQrSheetQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            setup: Arc::new(self.setup),
            claims: Arc::new(self.claims),
            reveal: Arc::new(self.reveal),
            dashboard: Arc::new(self.dashboard),
            leaderboard: Arc::new(self.leaderboard),
            qr_sheet: Arc::new(self.qr_sheet),
        }
    }
}

/// Real services over `store` with the fixture clock.
pub fn memory_state(store: Arc<InMemoryStore>) -> HttpState {
    HttpState::from_repositories(
        HuntRepositories {
            players: store.clone(),
            keywords: store.clone(),
            discoveries: store,
        },
        fixture_clock(),
        Url::parse("https://hunt.example.org").expect("valid base url"),
    )
}

/// Test-only route that caches an arbitrary identity.
pub mod login_as {
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::{HttpResponse, test, web};

    use super::session_cookie;
    use crate::domain::{Error, PlayerIdentity};
    use crate::inbound::http::session::SessionContext;

    const PATH: &str = "/__test/identity";

    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route(
            PATH,
            web::post().to(
                |session: SessionContext, identity: web::Json<PlayerIdentity>| async move {
                    session.save(&identity)?;
                    Ok::<_, Error>(HttpResponse::Ok())
                },
            ),
        );
    }

    /// Cache `identity` and return the resulting session cookie.
    pub async fn cookie<S>(
        app: &S,
        identity: &PlayerIdentity,
    ) -> actix_web::cookie::Cookie<'static>
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri(PATH)
                .set_json(identity)
                .to_request(),
        )
        .await;
        assert!(res.status().is_success(), "identity route failed");
        session_cookie(&res)
    }
}
