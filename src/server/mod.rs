//! HTTP surface for the cookbook registry.
//!
//! The registry lives behind a single `RwLock`: registrations take the
//! write lock so the duplicate check and insert are atomic, summaries take
//! the read lock and may run concurrently.

pub mod handlers;
pub mod routes;

use crate::core::{parser, registry::Registry};
use routes::create_router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Cookbook file loaded into the registry at startup
    pub seed: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            seed: None,
        }
    }
}

/// Shared server state.
#[derive(Debug)]
pub struct ServerState {
    pub config: ServerConfig,
    pub registry: Registry,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
        }
    }

    pub fn with_registry(config: ServerConfig, registry: Registry) -> Self {
        Self { config, registry }
    }
}

/// Build the initial state, seeding the registry from `config.seed` if set.
pub fn initial_state(config: ServerConfig) -> Result<ServerState, String> {
    let Some(seed) = config.seed.clone() else {
        return Ok(ServerState::new(config));
    };

    let cookbook = parser::parse_cookbook_file(&seed)?;
    let (registry, errors) = parser::load_registry(&cookbook);
    for e in &errors {
        tracing::warn!("seed {}: {}", seed.display(), e);
    }
    tracing::info!("Seeded {} entries from {}", registry.len(), seed.display());
    Ok(ServerState::with_registry(config, registry))
}

/// Bind and serve until the process exits.
pub async fn run_server(config: ServerConfig) -> Result<(), String> {
    let state = initial_state(config)?;
    let bind_addr = state.config.bind_addr;
    tracing::info!("Starting cookbook server on {}", bind_addr);

    let app = create_router(Arc::new(RwLock::new(state)));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("cannot bind {}: {}", bind_addr, e))?;
    tracing::info!("Running on: http://{}", bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {}", e))
}
