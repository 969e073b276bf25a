use fix_core::enums::Role;
use fix_directory::NewAccount;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::limit::{apply_limit, effective_limit};
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::user_error;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fixpoint user`.
pub async fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UserCommands::Register {
            email,
            password,
            name,
            role,
            area,
        } => {
            let account = NewAccount {
                email: email.clone(),
                password: password.clone(),
                name: name.clone(),
                role: parse_enum::<Role>(role, "role")?,
                area: area.clone(),
            };
            let user = ctx.accounts.register(account).await.map_err(user_error)?;
            output(&user, flags.format)
        }
        UserCommands::List { role, limit } => {
            let role = parse_enum::<Role>(role, "role")?;
            let mut users = ctx.users.find_by_role(role).await.map_err(user_error)?;
            apply_limit(
                &mut users,
                effective_limit(*limit, flags.limit, ctx.config.general.default_limit),
            );
            output(&users, flags.format)
        }
        UserCommands::Show { id } => {
            let user = ctx.users.get(id).await.map_err(user_error)?;
            output(&user, flags.format)
        }
    }
}
