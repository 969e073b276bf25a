use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Login(args) => commands::login::handle(&args, ctx, flags).await,
        Commands::Incident { action } => commands::incident::handle(&action, ctx, flags).await,
        Commands::Dashboard { action } => commands::dashboard::handle(&action, ctx, flags).await,
        Commands::Import { action } => commands::import::handle(&action, ctx, flags).await,
    }
}
