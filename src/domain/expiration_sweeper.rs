//! Background task that periodically purges expired links.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Default time between two sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Deletes expired links on a fixed interval, independent of the request path.
///
/// A failed sweep is logged and the next tick proceeds as usual; nothing here
/// can bring the process down.
pub struct ExpirationSweeper {
    repository: Arc<dyn LinkRepository>,
    interval: Duration,
}

impl ExpirationSweeper {
    /// Creates a sweeper over the given repository.
    pub fn new(repository: Arc<dyn LinkRepository>, interval: Duration) -> Self {
        Self {
            repository,
            interval,
        }
    }

    /// Runs a single sweep with the current time as the cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store rejects the delete.
    pub async fn sweep_once(&self) -> Result<u64, AppError> {
        let removed = self.repository.delete_expired(Utc::now()).await?;
        metrics::counter!("links_swept_total").increment(removed);
        Ok(removed)
    }

    /// Runs forever. Should be spawned as a task.
    pub async fn run(self) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it so the first sweep
        // happens one full interval after startup.
        ticker.tick().await;

        info!(interval = ?self.interval, "Expiration sweeper started");

        loop {
            ticker.tick().await;

            match self.sweep_once().await {
                Ok(0) => debug!("Expiration sweep found nothing to remove"),
                Ok(removed) => info!(removed, "Expiration sweep removed expired links"),
                Err(e) => error!(error = %e, "Expiration sweep failed"),
            }
        }
    }

    /// Spawns the sweeper as a background task.
    pub fn spawn(
        repository: Arc<dyn LinkRepository>,
        interval: Duration,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(Self::new(repository, interval).run())
    }
}
