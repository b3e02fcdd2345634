//! Expiry module: the deadline sweep and the in-process sweeper loop.
//!
//! The sweep itself ([`ExpiryService::expire_pending_candidates`]) is a
//! single idempotent operation, directly callable by an external scheduler.
//! [`SweeperGroup`] wraps it in a periodic tokio task for deployments that
//! have no external cron.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::{AssignmentCandidate, DomainEvent};
use crate::error::RotaError;
use crate::ports::{Clock, EventSink};
use crate::store::AssignmentStore;

/// Marks candidates whose acceptance deadline has passed as expired.
pub struct ExpiryService {
    store: Arc<dyn AssignmentStore>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
}

impl ExpiryService {
    pub fn new(
        store: Arc<dyn AssignmentStore>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            store,
            clock,
            events,
        }
    }

    /// One sweep: every candidate still pending past its deadline becomes
    /// expired. Idempotent; re-running only affects candidates newly past
    /// deadline. Returns the expired rows.
    pub async fn expire_pending_candidates(
        &self,
    ) -> Result<Vec<AssignmentCandidate>, RotaError> {
        let now = self.clock.now();
        let expired = self.store.expire_due(now).await?;

        for candidate in &expired {
            self.events
                .emit(DomainEvent::CandidateExpired {
                    project_id: candidate.project_id,
                    candidate_id: candidate.candidate_id,
                    developer_id: candidate.developer_id,
                })
                .await;
        }

        if !expired.is_empty() {
            info!(count = expired.len(), "expired pending candidates");
        }
        Ok(expired)
    }
}

/// Sweeper task handle.
/// - `request_shutdown()` で sweeper が止まる
/// - `shutdown_and_join()` で終了を待てる
pub struct SweeperGroup {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl SweeperGroup {
    /// Spawn the periodic sweeper.
    pub fn spawn(service: Arc<ExpiryService>, interval: std::time::Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            sweeper_loop(service, interval, shutdown_rx).await;
        });

        Self { shutdown_tx, join }
    }

    /// Request shutdown. An in-flight sweep finishes; no new tick starts.
    pub fn request_shutdown(&self) {
        // ignore send error: receiver may already be dropped
        let _ = self.shutdown_tx.send(true);
    }

    /// Shutdown and wait for the sweeper to exit.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }
}

async fn sweeper_loop(
    service: Arc<ExpiryService>,
    interval: std::time::Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    // 起動直後の即時 tick は捨てない: 再起動時に溜まった期限切れを拾える
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        // tick は「待つ」ので select で shutdown と競合させる
        tokio::select! {
            _ = shutdown_rx.changed() => {
                continue;
            }
            _ = ticker.tick() => {}
        }

        // Sweep errors must not kill the loop; the next tick retries the
        // same idempotent operation.
        if let Err(e) = service.expire_pending_candidates().await {
            error!(error = %e, "expiry sweep failed");
        }
    }
}
