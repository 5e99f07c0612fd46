//! Shared helpers for the Diesel integration suites.
//!
//! Each suite under `backend/tests/` compiles as its own crate; pulling this
//! module in with `mod support;` gives them one embedded PostgreSQL cluster
//! and a freshly migrated database per test.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{HuntDatabase, hunt_database};
