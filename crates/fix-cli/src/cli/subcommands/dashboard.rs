use clap::Subcommand;

/// Dashboard commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DashboardCommands {
    /// Incident counts per reporter area.
    Area {
        /// Keep printing updated counts until interrupted.
        #[arg(long)]
        watch: bool,
    },
    /// Incident counts per status.
    Status {
        /// Keep printing updated counts until interrupted.
        #[arg(long)]
        watch: bool,
    },
}
