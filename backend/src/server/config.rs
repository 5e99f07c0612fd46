//! Everything `create_server` needs to know before it binds.

use std::net::SocketAddr;
use std::path::PathBuf;

use hunt::inbound::http::session_config::SessionSettings;
use hunt::outbound::persistence::DbPool;
use url::Url;

/// Startup inputs for the hunt server.
///
/// `public_base_url` prefixes every claim link printed on the QR sheet.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) public_base_url: Url,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) keywords_file: Option<PathBuf>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, public_base_url: Url) -> Self {
        Self {
            session,
            bind_addr,
            public_base_url,
            db_pool: None,
            keywords_file: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one the server keeps all state in memory for the lifetime of
    /// the process.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed keywords from `path` before accepting requests.
    #[must_use]
    pub fn with_keywords_file(mut self, path: Option<PathBuf>) -> Self {
        self.keywords_file = path;
        self
    }
}
