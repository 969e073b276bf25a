use std::path::PathBuf;

use clap::Subcommand;

/// Import commands. Files hold a JSON array of legacy documents.
#[derive(Clone, Debug, Subcommand)]
pub enum ImportCommands {
    /// Import `incidente` documents.
    Incidents {
        #[arg(long)]
        file: PathBuf,
    },
    /// Import `usuario` documents.
    Users {
        #[arg(long)]
        file: PathBuf,
    },
}
