//! Core crate: in-memory session/message/report storage, the remote agent
//! relay with its local fallback, and report synchronization against the
//! remote object store.

pub mod agent;
pub mod config;
pub mod error;
pub mod models;
pub mod object_store;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{CoreError, Result};

use std::sync::Arc;

use agent::{AgentClient, FallbackClient, HttpAgentClient};
use object_store::{HttpObjectStore, ObjectStore};
use storage::Storage;

/// Core application state, constructed once at process start and shared by
/// reference with every request handler
pub struct AppCore {
    pub config: Config,
    pub storage: Storage,
    pub agent: Arc<dyn AgentClient>,
    pub fallback: FallbackClient,
    pub object_store: Arc<dyn ObjectStore>,
}

impl AppCore {
    /// Wire up the production HTTP clients from configuration.
    pub fn new(config: Config) -> Self {
        let agent = Arc::new(HttpAgentClient::new(
            &config.agent_url,
            &config.agent_id,
            &config.agent_alias_id,
        ));
        let fallback = FallbackClient::new(&config.fallback_url);
        let object_store = Arc::new(HttpObjectStore::new(
            &config.reports_url,
            &config.reports_bucket,
        ));
        Self::with_clients(config, agent, fallback, object_store)
    }

    /// Construct with injected remote collaborators.
    pub fn with_clients(
        config: Config,
        agent: Arc<dyn AgentClient>,
        fallback: FallbackClient,
        object_store: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            config,
            storage: Storage::new(),
            agent,
            fallback,
            object_store,
        }
    }
}

/// Core wired to mocks, for tests in this crate and downstream.
pub fn test_core(
    agent: agent::MockAgentClient,
    remote_reports: object_store::MockObjectStore,
    config: Config,
) -> Arc<AppCore> {
    let fallback = FallbackClient::new(&config.fallback_url);
    Arc::new(AppCore::with_clients(
        config,
        Arc::new(agent),
        fallback,
        Arc::new(remote_reports),
    ))
}
