//! Service liveness command.

#![allow(clippy::print_stdout)]

use crate::cli::context::Context;
use crate::data::{Fetched, HealthStatus, check_health, spawn_health_monitor};
use crate::error::{Error, Result};
use crate::output::{JsonEnvelope, OutputMode, ResultType, finish_spinner};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `checking`, `online` or `offline`.
    pub status: String,
    /// Probed service base URL.
    pub url: String,
    /// When the status was observed.
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    fn new(status: HealthStatus, url: &str) -> Self {
        Self {
            status: status.to_string(),
            url: url.to_string(),
            checked_at: Utc::now(),
        }
    }
}

/// Check the service once, or keep watching it until interrupted.
///
/// A single check that finds the service offline fails the command.
pub async fn run_health(ctx: &Context, watch: bool) -> Result<()> {
    if watch {
        return watch_health(ctx).await;
    }

    let spinner = ctx.spinner("Checking service");
    let status = check_health(&ctx.client).await;
    finish_spinner(spinner);

    let report = HealthReport::new(status, ctx.client.base_url().as_str());
    ctx.emit_live(ResultType::Health, report, render_report)?;

    if status == HealthStatus::Offline {
        return Err(Error::Unavailable {
            message: format!("service at {} is offline", ctx.client.base_url()),
        });
    }
    Ok(())
}

fn render_report(report: &HealthReport) -> String {
    format!("Service at {} is {}", report.url, report.status)
}

async fn watch_health(ctx: &Context) -> Result<()> {
    let interval = ctx.config.health.interval();
    let monitor = spawn_health_monitor(ctx.client.clone(), interval);
    let cancel = monitor.cancellation_token();

    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    debug!("Watching {} every {interval:?}", ctx.client.base_url());
    let url = ctx.client.base_url().to_string();
    let mut updates = monitor.subscribe();

    loop {
        let status = *updates.borrow_and_update();
        let report = HealthReport::new(status, &url);
        match ctx.output {
            OutputMode::Text => println!(
                "{} {}",
                report.checked_at.format("%Y-%m-%d %H:%M:%S"),
                render_report(&report)
            ),
            OutputMode::Json => {
                let envelope = JsonEnvelope::from_fetched(ResultType::Health, Fetched::Live(report));
                println!("{}", envelope.to_json_line()?);
            }
        }

        tokio::select! {
            () = cancel.cancelled() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    monitor.stop().await;
    Ok(())
}
