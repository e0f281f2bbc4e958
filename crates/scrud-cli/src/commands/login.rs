use anyhow::bail;
use scrud_core::enums::UserRole;
use scrud_core::identity::LoggedInUser;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrud login`.
pub async fn handle(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = login(args, ctx).await?;
    output(&user, flags.format)
}

async fn login(args: &LoginArgs, ctx: &AppContext) -> anyhow::Result<LoggedInUser> {
    let role: UserRole = parse_enum(&args.role, "role")?;
    match ctx.service.login(&args.email, &args.password, role).await? {
        Some(user) => Ok(user),
        None => bail!("invalid email or password"),
    }
}
