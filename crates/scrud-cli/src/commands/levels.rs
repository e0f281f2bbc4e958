use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrud levels`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let levels = ctx.service.list_levels().await?;
    output(&levels, flags.format)
}
