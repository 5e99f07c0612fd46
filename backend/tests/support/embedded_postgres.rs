//! Embedded PostgreSQL for Diesel adapter tests.
//!
//! One cluster is shared by the whole test binary. The first caller creates a
//! template database named after a hash of `backend/migrations` and migrates
//! it with [`run_migrations`]; every test then gets its own clone of that
//! template, dropped when the [`HuntDatabase`] goes out of scope.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use hunt::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_PREFIX: &str = "hunt_template";
const CLUSTER_RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);
const TEST_POOL_SIZE: u32 = 8;

/// A migrated, per-test database plus the runtime that drives its pool.
///
/// Fields drop in order: the pool's connections close with the runtime
/// before the database itself is dropped.
pub struct HuntDatabase {
    pub pool: DbPool,
    pub runtime: Runtime,
    _database: TemporaryDatabase,
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

/// The embedded password must stay stable so a data directory reused by a
/// later test process still accepts it.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster spawns any threads, under the
        // template lock.
        unsafe {
            std::env::set_var("PG_PASSWORD", "hunt_embedded_test");
        }
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt < CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt}/{CLUSTER_RETRIES} failed: {err:?}");
                std::thread::sleep(RETRY_DELAY);
                attempt += 1;
            }
            Err(err) => return Err(format!("start shared cluster: {err:?}")),
        }
    }
}

fn ensure_template(cluster: &ClusterHandle, runtime: &Runtime) -> Result<String, String> {
    let hash =
        hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err:?}"))?;
    let template = format!("{TEMPLATE_PREFIX}_{}", hash.get(..8).unwrap_or(&hash));

    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template);
        runtime
            .block_on(run_migrations(&url))
            .map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(template)
}

fn setup() -> Result<HuntDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let template = ensure_template(cluster, &runtime)?;
    let name = format!("test_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database_from_template(name.as_str(), template.as_str())
        .map_err(|err| format!("clone template: {err:?}"))?;

    let config = PoolConfig::new(database.url()).with_max_size(TEST_POOL_SIZE);
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(HuntDatabase {
        pool,
        runtime,
        _database: database,
    })
}

/// Provision a database for one test, or `None` when the cluster is
/// unavailable and `SKIP_TEST_CLUSTER` allows skipping.
pub fn hunt_database() -> Option<HuntDatabase> {
    match setup() {
        Ok(database) => Some(database),
        Err(reason) => super::handle_cluster_setup_failure(reason),
    }
}
