//! Server settings loaded via OrthoConfig.
//!
//! Values layer from the command line, `HUNT_*` environment variables and an
//! optional configuration file. Session cookie settings are read separately;
//! see [`crate::inbound::http::session_config`].

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::persistence::DEFAULT_POOL_SIZE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

fn default_bind_addr() -> String {
    String::from(DEFAULT_BIND_ADDR)
}

fn default_public_base_url() -> String {
    String::from(DEFAULT_PUBLIC_BASE_URL)
}

/// Invalid setting values.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid public base URL {value:?}: {source}")]
    PublicBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("pool size must be positive")]
    PoolSize,
}

/// Runtime configuration for the hunt server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HUNT")]
pub struct HuntSettings {
    /// Socket address to listen on.
    #[ortho_config(default = default_bind_addr())]
    pub bind_addr: String,
    /// PostgreSQL connection string. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Origin printed into QR claim links.
    #[ortho_config(default = default_public_base_url())]
    pub public_base_url: String,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// JSON document of keywords to seed at startup.
    pub keywords_file: Option<PathBuf>,
}

impl Default for HuntSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_url: None,
            public_base_url: default_public_base_url(),
            pool_max_size: None,
            keywords_file: None,
        }
    }
}

impl HuntSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn public_base_url(&self) -> Result<Url, SettingsError> {
        Url::parse(&self.public_base_url).map_err(|source| SettingsError::PublicBaseUrl {
            value: self.public_base_url.clone(),
            source,
        })
    }

    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size {
            Some(0) => Err(SettingsError::PoolSize),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_POOL_SIZE),
        }
    }

    pub fn keywords_file(&self) -> Option<&Path> {
        self.keywords_file.as_deref()
    }
}
