use std::path::Path;

use anyhow::Context;
use fix_core::legacy::{IncidentDocument, UserDocument};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ImportCommands;
use crate::commands::shared::user_error;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ImportSummary {
    collection: &'static str,
    imported: usize,
}

/// Handle `fixpoint import`.
pub async fn handle(
    action: &ImportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let summary = match action {
        ImportCommands::Incidents { file } => {
            let docs: Vec<IncidentDocument> = read_documents(file)?;
            ImportSummary {
                collection: "incidente",
                imported: ctx.incidents.import(docs).await.map_err(user_error)?,
            }
        }
        ImportCommands::Users { file } => {
            let docs: Vec<UserDocument> = read_documents(file)?;
            ImportSummary {
                collection: "usuario",
                imported: ctx.users.import(docs).await.map_err(user_error)?,
            }
        }
    };
    output(&summary, flags.format)
}

fn read_documents<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of documents", path.display()))
}
