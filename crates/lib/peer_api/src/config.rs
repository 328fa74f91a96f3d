//! API server configuration.

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default size of the database connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8000").
    pub bind_addr: String,
    /// PostgreSQL connection URL, if configured.
    pub database_url: Option<String>,
    /// Database name overriding the one in `database_url`, if configured.
    pub database_name: Option<String>,
    /// Maximum number of database connections in the pool.
    pub max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            database_url: None,
            database_name: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces_on_8000() {
        let config = ApiConfig::default();
        assert_eq!("0.0.0.0:8000", config.bind_addr);
        assert!(config.database_url.is_none());
        assert_eq!(DEFAULT_MAX_CONNECTIONS, config.max_connections);
    }
}
