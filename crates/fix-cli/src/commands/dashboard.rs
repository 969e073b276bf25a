use std::time::Duration;

use fix_core::enums::IncidentStatus;
use fix_core::responses::{AreaCounts, StatusCounts};
use fix_directory::Subscription;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DashboardCommands;
use crate::commands::shared::user_error;
use crate::context::AppContext;
use crate::output::output;

/// One dashboard line: a group and its incident count.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DashboardRow {
    pub group: String,
    pub incidents: u64,
}

const TOTAL: &str = "total";

/// Handle `fixpoint dashboard`.
pub async fn handle(
    action: &DashboardCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DashboardCommands::Area { watch: false } => {
            let counts = ctx.incidents.aggregate_by_area().await.map_err(user_error)?;
            output(&area_rows(&counts), flags.format)
        }
        DashboardCommands::Status { watch: false } => {
            let counts = ctx.incidents.aggregate_by_status().await.map_err(user_error)?;
            output(&status_rows(&counts), flags.format)
        }
        DashboardCommands::Area { watch: true } => {
            follow(ctx.incidents.watch_by_area(), area_rows, ctx, flags).await
        }
        DashboardCommands::Status { watch: true } => {
            follow(ctx.incidents.watch_by_status(), status_rows, ctx, flags).await
        }
    }
}

/// Print every snapshot until Ctrl-C.
async fn follow<T>(
    mut live: Subscription<T>,
    rows: fn(&T) -> Vec<DashboardRow>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()>
where
    T: Clone + Send + Sync + 'static,
{
    let poll_ms = ctx.config.store.poll_interval_ms;
    let watcher = (poll_ms > 0 && !ctx.config.store.is_in_memory())
        .then(|| ctx.store.spawn_external_watch(Duration::from_millis(poll_ms)));

    let result = loop {
        tokio::select! {
            snapshot = live.next() => match snapshot {
                Some(Ok(counts)) => {
                    if let Err(error) = output(&rows(&counts), flags.format) {
                        break Err(error);
                    }
                }
                Some(Err(message)) => tracing::warn!(%message, "dashboard refresh failed"),
                None => break Ok(()),
            },
            _ = tokio::signal::ctrl_c() => break Ok(()),
        }
    };

    live.close();
    if let Some(watcher) = watcher {
        watcher.abort();
    }
    result
}

fn area_rows(counts: &AreaCounts) -> Vec<DashboardRow> {
    let mut rows: Vec<DashboardRow> = counts
        .counts
        .iter()
        .map(|(area, incidents)| DashboardRow {
            group: area.clone(),
            incidents: *incidents,
        })
        .collect();
    rows.push(DashboardRow {
        group: TOTAL.into(),
        incidents: counts.total(),
    });
    rows
}

fn status_rows(counts: &StatusCounts) -> Vec<DashboardRow> {
    let mut rows: Vec<DashboardRow> = IncidentStatus::ALL
        .into_iter()
        .map(|status| DashboardRow {
            group: status.label().to_string(),
            incidents: counts.get(status),
        })
        .collect();
    rows.push(DashboardRow {
        group: TOTAL.into(),
        incidents: counts.total(),
    });
    rows
}
