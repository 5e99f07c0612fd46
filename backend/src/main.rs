//! Hunt server entry-point: loads settings, prepares the data store and
//! serves the REST API.

mod server;

use std::path::Path;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hunt::inbound::http::health::HealthState;
use hunt::inbound::http::session_config::{BuildMode, session_settings_from_env};
use hunt::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use hunt::settings::HuntSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = HuntSettings::load().map_err(std::io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let public_base_url = settings.public_base_url().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr, public_base_url)
        .with_keywords_file(settings.keywords_file().map(Path::to_path_buf));

    if let Some(database_url) = settings.database_url() {
        run_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool_config = PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size().map_err(std::io::Error::other)?);
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database URL configured; state will not survive a restart");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    info!(%bind_addr, "hunt server listening");
    server.await
}
