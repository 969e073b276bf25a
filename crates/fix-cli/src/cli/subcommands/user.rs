use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register an account and its profile.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        /// chief, technician, common (or jefe, tecnico, comun)
        #[arg(long)]
        role: String,
        /// Required for common users.
        #[arg(long)]
        area: Option<String>,
    },
    /// List users with a role.
    List {
        #[arg(long)]
        role: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show a user profile.
    Show { id: String },
}
