//! Notification sink
//!
//! Phase transitions report here; what "delivering a notification" means
//! (SMS, email, push, nothing) is the implementation's business, never the
//! core's. The default implementation just logs.

use async_trait::async_trait;
use shared::models::{Jar, JarStatus};

/// Receiver for jar lifecycle events.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Called after a phase transition has committed.
    async fn phase_changed(&self, jar: &Jar, to: JarStatus);
}

/// Default sink: structured log lines only.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn phase_changed(&self, jar: &Jar, to: JarStatus) {
        tracing::info!(
            jar_id = %jar.id,
            title = %jar.title,
            phase = %to,
            "Jar phase changed"
        );
    }
}
