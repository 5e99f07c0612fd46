//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the hunt repository ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: `models.rs` and `schema.rs` never leave this module.
//! - **Store-side atomicity**: the keyword claim is a conditional update and
//!   the point credit is a delta applied inside the discovery transaction.
//!
//! # Example
//!
//! ```ignore
//! use hunt::outbound::persistence::{DbPool, DieselKeywordRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hunt")).await?;
//! let keywords = DieselKeywordRepository::new(pool);
//! ```

mod diesel_discovery_repository;
mod diesel_error_mapping;
mod diesel_keyword_repository;
mod diesel_player_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_discovery_repository::DieselDiscoveryRepository;
pub use diesel_keyword_repository::DieselKeywordRepository;
pub use diesel_player_repository::DieselPlayerRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
