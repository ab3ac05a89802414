//! Background liveness polling.

use crate::api::ApiClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Service liveness as seen by the last check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// No check has completed yet.
    Checking,
    /// The last check succeeded.
    Online,
    /// The last check failed.
    Offline,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checking => write!(f, "checking"),
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Check once. Any failure counts as offline.
pub async fn check_health(client: &ApiClient) -> HealthStatus {
    match client.health_check().await {
        Ok(body) => {
            debug!("Health check OK: {}", body.trim());
            HealthStatus::Online
        }
        Err(e) => {
            debug!("Health check failed: {e}");
            HealthStatus::Offline
        }
    }
}

/// Shortest polling period; shorter intervals are raised to this.
pub const MIN_HEALTH_INTERVAL: Duration = Duration::from_millis(1);

/// Poll the liveness endpoint every `interval` until the handle is stopped
/// or dropped. The first check runs immediately.
///
/// An `interval` below [`MIN_HEALTH_INTERVAL`] (including zero) is raised to
/// it. Must be called from within a tokio runtime.
pub fn spawn_health_monitor(client: Arc<ApiClient>, interval: Duration) -> HealthMonitorHandle {
    let interval = interval.max(MIN_HEALTH_INTERVAL);
    let (tx, rx) = watch::channel(HealthStatus::Checking);
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let status = tokio::select! {
                () = token.cancelled() => break,
                status = check_health(&client) => status,
            };

            tx.send_if_modified(|current| {
                if *current == status {
                    return false;
                }
                info!("Service is {status}");
                *current = status;
                true
            });
        }

        debug!("Health monitor stopped");
    });

    HealthMonitorHandle {
        status: rx,
        cancel,
        task: Some(task),
    }
}

/// Owner of a running health monitor.
///
/// Dropping the handle cancels the polling task.
#[derive(Debug)]
pub struct HealthMonitorHandle {
    status: watch::Receiver<HealthStatus>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl HealthMonitorHandle {
    /// Latest status.
    pub fn status(&self) -> HealthStatus {
        *self.status.borrow()
    }

    /// Receiver notified when the status changes.
    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.status.clone()
    }

    /// Token that stops the monitor when cancelled (e.g. from a signal handler).
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop polling and wait for the task to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for HealthMonitorHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
