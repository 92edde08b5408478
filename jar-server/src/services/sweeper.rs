//! Background deadline sweeper
//!
//! Periodic complement to the per-request lazy checks: every tick, jars
//! whose deadline has passed get the same idempotent sweep a read would
//! trigger. Safe to run concurrently with request-driven checks — both go
//! through CAS transitions.

use crate::core::ServerState;
use crate::db::repository::jar as jar_repo;
use crate::jars::sweep;
use shared::util::now_millis;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct DeadlineSweeper {
    state: ServerState,
}

impl DeadlineSweeper {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Run until the shutdown token fires.
    pub async fn run(self, shutdown: CancellationToken) {
        let interval_secs = self.state.config.sweep_interval_secs.max(1);
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // 第一次 tick 立即触发，启动即补扫一次
        tracing::info!(interval_secs, "Deadline sweeper started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Deadline sweeper stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.sweep_once().await;
                }
            }
        }
    }

    /// One pass over all jars with an expired deadline.
    pub async fn sweep_once(&self) {
        let now = now_millis();
        let due = match jar_repo::find_past_deadline(&self.state.pool, now).await {
            Ok(jars) => jars,
            Err(e) => {
                tracing::error!(error = %e, "Deadline sweep query failed");
                return;
            }
        };

        if due.is_empty() {
            return;
        }

        tracing::debug!(count = due.len(), "Sweeping jars past deadline");
        for jar in due {
            let jar_id = jar.id.clone();
            if let Err(e) =
                sweep::sweep_jar(&self.state.pool, self.state.notifier.as_ref(), jar, now).await
            {
                // per-jar errors don't stop the pass
                tracing::error!(jar_id = %jar_id, error = %e, "Deadline sweep failed for jar");
            }
        }
    }
}
