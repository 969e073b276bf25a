use clap::{Args, Subcommand};

use crate::cli::subcommands::{DashboardCommands, ImportCommands, IncidentCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Accounts and user profiles.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Check credentials and show the caller's profile.
    Login(LoginArgs),
    /// Incident tickets.
    Incident {
        #[command(subcommand)]
        action: IncidentCommands,
    },
    /// Read-only incident counts.
    Dashboard {
        #[command(subcommand)]
        action: DashboardCommands,
    },
    /// Load documents exported from the original collections.
    Import {
        #[command(subcommand)]
        action: ImportCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}
