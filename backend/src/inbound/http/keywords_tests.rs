//! Regression coverage for this module.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;

use super::*;
use crate::domain::ports::{KeywordRepository, MockClaimCommand, PlayerRepository};
use crate::domain::test_fixtures::{claimed_keyword, player, unclaimed_keyword};
use crate::domain::{Keyword, Player, PlayerIdentity};
use crate::inbound::http::players::{PlayerResponse, current_player};
use crate::inbound::http::test_utils::{
    MockPorts, login_as, memory_state, session_cookie, test_session_middleware,
};
use crate::outbound::memory::InMemoryStore;

struct World {
    store: Arc<InMemoryStore>,
    ana: Player,
    bea: Player,
    toucan: Keyword,
    macaw: Keyword,
}

async fn world() -> World {
    let store = Arc::new(InMemoryStore::new());
    let ana = player("Ana", 50, 0);
    let bea = player("Bea", 10, 1);
    let toucan = unclaimed_keyword("toucan", 20);
    let macaw = claimed_keyword("macaw", 10, bea.id());
    store.insert(&ana).await.expect("insert ana");
    store.insert(&bea).await.expect("insert bea");
    store
        .seed(&[toucan.clone(), macaw.clone()])
        .await
        .expect("seed keywords");
    World {
        store,
        ana,
        bea,
        toucan,
        macaw,
    }
}

async fn app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .configure(login_as::routes)
            .service(reveal_keyword)
            .service(claim_keyword)
            .service(current_player),
    )
    .await
}

async fn claim<S>(app: &S, keyword: &Keyword, cookie: Cookie<'static>) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/keywords/{}/claim", keyword.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await
}

async fn reveal<S>(app: &S, keyword: &Keyword, cookie: Cookie<'static>) -> KeywordRevealResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/keywords/{}", keyword.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    test::read_body_json(res).await
}

#[rstest]
#[actix_web::test]
async fn fresh_claim_refreshes_cached_total() {
    let world = world().await;
    let app = app(memory_state(world.store.clone())).await;
    let cookie = login_as::cookie(&app, &world.ana.identity()).await;

    assert_eq!(
        reveal(&app, &world.toucan, cookie.clone()).await.status,
        KeywordStatus::Available
    );

    let res = claim(&app, &world.toucan, cookie).await;
    assert_eq!(res.status(), StatusCode::OK);
    let refreshed = session_cookie(&res);
    let outcome: ClaimOutcome = test::read_body_json(res).await;
    assert_eq!(
        outcome,
        ClaimOutcome::FreshClaim {
            word: "toucan".to_owned(),
            points: 20,
            total_points: 70,
        }
    );

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/players/me")
            .cookie(refreshed.clone())
            .to_request(),
    )
    .await;
    let cached: PlayerResponse = test::read_body_json(res).await;
    assert_eq!(cached.total_points, 70);

    let view = reveal(&app, &world.toucan, refreshed).await;
    assert_eq!(view.status, KeywordStatus::ClaimedBySelf);
    assert_eq!(view.size_label, "Medium");
}

#[rstest]
#[actix_web::test]
async fn repeat_claim_credits_nothing() {
    let world = world().await;
    let app = app(memory_state(world.store.clone())).await;
    let cookie = login_as::cookie(&app, &world.ana.identity()).await;

    let first = claim(&app, &world.toucan, cookie.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);
    let res = claim(&app, &world.toucan, cookie).await;

    let outcome: ClaimOutcome = test::read_body_json(res).await;
    assert_eq!(outcome, ClaimOutcome::AlreadyClaimedBySelf);
    let stored = PlayerRepository::find_by_id(world.store.as_ref(), &world.ana.id())
        .await
        .expect("lookup")
        .expect("ana exists");
    assert_eq!(stored.total_points(), 70);
}

#[rstest]
#[actix_web::test]
async fn claim_of_owned_keyword_names_the_owner() {
    let world = world().await;
    let app = app(memory_state(world.store.clone())).await;
    let cookie = login_as::cookie(&app, &world.ana.identity()).await;

    let res = claim(&app, &world.macaw, cookie.clone()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["outcome"], "claimed_by_other");
    assert_eq!(body["claimerName"], world.bea.name().as_ref());
    let view = reveal(&app, &world.macaw, cookie).await;
    assert_eq!(
        view.status,
        KeywordStatus::ClaimedByOther {
            claimer_name: Some("Bea".to_owned()),
        }
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_keyword_is_not_found() {
    let world = world().await;
    let app = app(memory_state(world.store.clone())).await;
    let cookie = login_as::cookie(&app, &world.ana.identity()).await;
    let ghost = unclaimed_keyword("ghost", 5);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/keywords/{}", ghost.id()))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = claim(&app, &ghost, cookie).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn claim_without_identity_redirects_to_setup() {
    let world = world().await;
    let app = app(memory_state(world.store.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/keywords/{}/claim", world.toucan.id()))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["redirect"], "/setup");
}

#[rstest]
#[actix_web::test]
async fn store_outage_leaves_cached_total_alone() {
    let mut claims = MockClaimCommand::new();
    claims
        .expect_claim()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("store offline")));
    let ports = MockPorts {
        claims,
        ..MockPorts::default()
    };
    let app = app(ports.into_state()).await;
    let identity = PlayerIdentity {
        id: crate::domain::PlayerId::random(),
        name: "Ana".to_owned(),
        total_points: 50,
    };
    let cookie = login_as::cookie(&app, &identity).await;
    let keyword = unclaimed_keyword("toucan", 20);

    let res = claim(&app, &keyword, cookie).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(
        res.response()
            .cookies()
            .all(|cookie| cookie.name() != crate::inbound::http::test_utils::SESSION_COOKIE)
    );
}
