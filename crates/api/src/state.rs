use std::sync::Arc;

use slangdex_core::catalog::Catalog;
use slangdex_core::duplicate_check::DuplicateCheck;
use slangdex_core::review_queue::ReviewQueue;
use slangdex_core::vote_ledger::VoteLedger;
use slangdex_db::store::PgStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and every service hold reference-counted
/// handles.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: slangdex_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Submission, lookup and listing of content items.
    pub catalog: Catalog<PgStore>,
    /// Moderator review queue.
    pub queue: ReviewQueue<PgStore>,
    /// Advisory duplicate-term lookup.
    pub duplicates: DuplicateCheck<PgStore>,
    /// Votes and tallies.
    pub votes: VoteLedger<PgStore>,
}

impl AppState {
    /// Wire every service to the same pool and read-retry policy.
    pub fn new(pool: slangdex_db::DbPool, config: ServerConfig) -> Self {
        let store = PgStore::new(pool.clone());
        let retry = config.read_retry;
        let catalog = Catalog::new(store.clone(), retry);

        Self {
            pool,
            config: Arc::new(config),
            queue: ReviewQueue::new(catalog.clone()),
            duplicates: DuplicateCheck::new(store.clone(), retry),
            votes: VoteLedger::new(store, retry),
            catalog,
        }
    }
}
