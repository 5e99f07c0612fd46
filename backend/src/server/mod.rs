//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use hunt::Trace;
#[cfg(debug_assertions)]
use hunt::doc::ApiDoc;
use hunt::inbound::http::configure_api;
use hunt::inbound::http::health::{HealthState, live, ready};
use hunt::inbound::http::session_config::SessionSettings;
use hunt::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Per-worker application: probes at the root, the hunt API under
/// `/api/v1` behind the identity cookie, every request traced.
fn hunt_app(
    health: web::Data<HealthState>,
    state: web::Data<HttpState>,
    session: SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health)
        .app_data(state)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .service(
            web::scope("/api/v1")
                .wrap(session.middleware())
                .configure(configure_api),
        );

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Prepare the data store, bind the listener and mark the service ready.
///
/// Keyword seeding completes before the socket is bound, so the first
/// request already sees every seeded keyword.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding or binding fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config).await?);
    let session = config.session;
    let worker_health = health_state.clone();

    let server = HttpServer::new(move || {
        hunt_app(worker_health.clone(), http_state.clone(), session.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
