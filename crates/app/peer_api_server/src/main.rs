//! Peer assistant HTTP server binary.
//!
//! Connects to PostgreSQL when `DATABASE_URL` is configured. If the database is
//! missing or unreachable the server still starts and answers chats without
//! history.

use std::sync::Arc;

use clap::Parser;
use peer_api::config::{ApiConfig, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};
use peer_core::store::postgres::PgStoreConfig;
use peer_core::store::{DocumentStore, MemoryStore, PgDocumentStore};
use tracing::{info, warn};

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "peer_api_server", about = "Peer assistant backend")]
struct Args {
    /// Host interface to bind.
    #[arg(long, env = "BIND_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Database name, overriding the one in the connection URL.
    #[arg(long, env = "DATABASE_NAME")]
    database_name: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,

    /// Keep conversations in process memory instead of PostgreSQL.
    #[arg(long, default_value_t = false)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,peer_api=debug,peer_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        database_url: args.database_url.filter(|u| !u.is_empty()),
        database_name: args.database_name.filter(|n| !n.is_empty()),
        max_connections: args.max_connections,
    };

    info!(
        version = peer_core::version(),
        addr = %config.bind_addr,
        memory = args.memory,
        "starting peer_api_server"
    );

    let pg_store = if args.memory {
        None
    } else {
        connect_store(&config).await
    };

    let store: Option<Arc<dyn DocumentStore>> = match (&pg_store, args.memory) {
        (Some(pg), _) => Some(Arc::new(pg.clone())),
        (None, true) => Some(Arc::new(MemoryStore::new())),
        (None, false) => None,
    };

    let app = peer_api::router(peer_api::AppState::new(store, config.clone()));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pg) = pg_store {
        info!("closing database pool");
        pg.close().await;
    }

    info!("shut down");
    Ok(())
}

/// Connect to PostgreSQL if configured. Any failure leaves the server running
/// without a store.
async fn connect_store(config: &ApiConfig) -> Option<PgDocumentStore> {
    let Some(database_url) = config.database_url.clone() else {
        warn!("DATABASE_URL not set, running without a database");
        return None;
    };

    let pg_config = PgStoreConfig {
        database_url,
        database_name: config.database_name.clone(),
        max_connections: config.max_connections,
    };

    match PgDocumentStore::connect(&pg_config).await {
        Ok(store) => {
            info!(database = store.database_name(), "document store ready");
            Some(store)
        }
        Err(e) => {
            warn!("database unavailable, running without history: {e}");
            None
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn env_of(arg_id: &str) -> Option<String> {
        Args::command()
            .get_arguments()
            .find(|a| a.get_id() == arg_id)
            .and_then(|a| a.get_env())
            .map(|e| e.to_string_lossy().into_owned())
    }

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn host_is_not_read_from_the_generic_host_variable() {
        assert_eq!(Some("BIND_HOST".to_string()), env_of("host"));
        assert_eq!(Some("PORT".to_string()), env_of("port"));
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "peer_api_server",
            "--host",
            "127.0.0.1",
            "--port",
            "9001",
            "--memory",
        ])
        .expect("parse");
        assert_eq!("127.0.0.1", args.host);
        assert_eq!(9001, args.port);
        assert!(args.memory);
    }
}
