use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::commands::shared::user_error;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fixpoint login`.
pub async fn handle(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx
        .accounts
        .login(&args.email, &args.password)
        .await
        .map_err(user_error)?;
    output(&session, flags.format)
}
