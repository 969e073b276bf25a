use clap::Subcommand;

/// Incident commands.
#[derive(Clone, Debug, Subcommand)]
pub enum IncidentCommands {
    /// Report an incident.
    Submit {
        /// Report on behalf of a common user, copying their name and area.
        #[arg(long, conflicts_with_all = ["reporter", "area"])]
        reporter_id: Option<String>,
        #[arg(long, requires = "area")]
        reporter: Option<String>,
        #[arg(long, requires = "reporter")]
        area: Option<String>,
        #[arg(long)]
        description: String,
        #[arg(long)]
        equipment: String,
    },
    /// Get an incident by code.
    Get { code: String },
    /// Incidents awaiting a technician.
    Unassigned {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Assign a technician.
    Assign {
        code: String,
        #[arg(long)]
        technician: String,
    },
    /// Pending incidents assigned to a technician.
    Pending {
        #[arg(long)]
        technician: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Incidents reported by a user (exact name match).
    Mine {
        #[arg(long)]
        reporter: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Mark an incident solved.
    Resolve { code: String },
    /// Mark an incident pending.
    Defer { code: String },
    /// List every incident.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}
