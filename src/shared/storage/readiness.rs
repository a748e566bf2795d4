use sea_orm::DatabaseConnection;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use migration::{Migrator, MigratorTrait};

use crate::modules::course::adapter::outgoing::CourseRepositoryPostgres;
use crate::modules::course::application::domain::seed::default_catalog;

/// Health predicate consulted at the start of every storage-backed operation.
pub trait StoreReadiness: Send + Sync {
    fn is_ready(&self) -> bool;
}

/// Readiness for a deployment with no durable store configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverReady;

impl StoreReadiness for NeverReady {
    fn is_ready(&self) -> bool {
        false
    }
}

/// Flag flipped by hand; tests use it to simulate outages.
#[derive(Debug, Default)]
pub struct ManualReadiness {
    ready: AtomicBool,
}

impl ManualReadiness {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: AtomicBool::new(ready),
        }
    }

    pub fn set(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }
}

impl StoreReadiness for ManualReadiness {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

/// Postgres readiness kept current by a background probe.
///
/// The flag stays false until the first successful ping has also run the
/// migrations and seeded the catalog.
pub struct DatabaseReadiness {
    db: Arc<DatabaseConnection>,
    ready: AtomicBool,
    bootstrapped: AtomicBool,
}

impl DatabaseReadiness {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            ready: AtomicBool::new(false),
            bootstrapped: AtomicBool::new(false),
        }
    }

    /// One probe round. Returns the new readiness.
    pub async fn probe(&self) -> bool {
        let reachable = match self.db.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Database ping failed");
                false
            }
        };

        let ready = reachable && self.ensure_bootstrapped().await;
        let was_ready = self.ready.swap(ready, Ordering::SeqCst);
        if was_ready != ready {
            if ready {
                tracing::info!("Durable store is reachable");
            } else {
                tracing::warn!("Durable store became unreachable");
            }
        }
        ready
    }

    async fn ensure_bootstrapped(&self) -> bool {
        if self.bootstrapped.load(Ordering::SeqCst) {
            return true;
        }

        if let Err(e) = Migrator::up(&*self.db, None).await {
            tracing::error!(error = %e, "Failed to apply migrations");
            return false;
        }

        let courses = CourseRepositoryPostgres::new(Arc::clone(&self.db));
        match courses.seed_if_empty(default_catalog()).await {
            Ok(seeded) => {
                if seeded > 0 {
                    tracing::info!(seeded, "Seeded course catalog");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to seed course catalog");
                return false;
            }
        }

        self.bootstrapped.store(true, Ordering::SeqCst);
        true
    }

    /// Probes once immediately, then every `interval` for the life of the process.
    pub fn spawn_probe(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let readiness = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                readiness.probe().await;
            }
        })
    }
}

impl StoreReadiness for DatabaseReadiness {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}
