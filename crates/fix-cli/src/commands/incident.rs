use anyhow::bail;
use fix_core::entities::{Incident, NewIncident};
use fix_core::enums::IncidentStatus;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IncidentCommands;
use crate::commands::shared::limit::{apply_limit, effective_limit};
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::user_error;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fixpoint incident`.
pub async fn handle(
    action: &IncidentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let directory = &ctx.incidents;
    match action {
        IncidentCommands::Submit {
            reporter_id,
            reporter,
            area,
            description,
            equipment,
        } => {
            let incident = match (reporter_id, reporter, area) {
                (Some(id), _, _) => directory.submit_for(id, description, equipment).await,
                (None, Some(reporter), Some(area)) => {
                    directory
                        .submit(&NewIncident {
                            reporter_name: reporter.clone(),
                            reporter_area: area.clone(),
                            description: description.clone(),
                            equipment_name: equipment.clone(),
                        })
                        .await
                }
                _ => bail!("pass --reporter-id, or both --reporter and --area"),
            }
            .map_err(user_error)?;
            output(&incident, flags.format)
        }
        IncidentCommands::Get { code } => {
            let incident = directory.get(code).await.map_err(user_error)?;
            output(&incident, flags.format)
        }
        IncidentCommands::Unassigned { limit } => {
            let incidents = directory.list_unassigned().await.map_err(user_error)?;
            output_list(incidents, *limit, ctx, flags)
        }
        IncidentCommands::Assign { code, technician } => {
            directory
                .assign(code, technician)
                .await
                .map_err(user_error)?;
            show(code, ctx, flags).await
        }
        IncidentCommands::Pending { technician, limit } => {
            let incidents = directory
                .list_assigned_pending(technician)
                .await
                .map_err(user_error)?;
            output_list(incidents, *limit, ctx, flags)
        }
        IncidentCommands::Mine { reporter, limit } => {
            let incidents = directory
                .list_by_reporter(reporter)
                .await
                .map_err(user_error)?;
            output_list(incidents, *limit, ctx, flags)
        }
        IncidentCommands::Resolve { code } => {
            directory.set_resolved(code).await.map_err(user_error)?;
            show(code, ctx, flags).await
        }
        IncidentCommands::Defer { code } => {
            directory.set_pending(code).await.map_err(user_error)?;
            show(code, ctx, flags).await
        }
        IncidentCommands::List { status, limit } => {
            let mut incidents = directory.list_all().await.map_err(user_error)?;
            if let Some(status) = status {
                let status = parse_enum::<IncidentStatus>(status, "status")?;
                incidents.retain(|incident| incident.status == status);
            }
            output_list(incidents, *limit, ctx, flags)
        }
    }
}

async fn show(code: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let incident = ctx.incidents.get(code).await.map_err(user_error)?;
    output(&incident, flags.format)
}

fn output_list(
    mut incidents: Vec<Incident>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    apply_limit(
        &mut incidents,
        effective_limit(limit, flags.limit, ctx.config.general.default_limit),
    );
    output(&incidents, flags.format)
}
