//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use accounts::outbound::persistence::DbPool;
use accounts::token_config::TokenSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) tokens: TokenSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(tokens: TokenSettings, bind_addr: SocketAddr) -> Self {
        Self {
            tokens,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the credential store.
    ///
    /// Without one the server keeps accounts in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
