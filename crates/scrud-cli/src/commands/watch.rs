use scrud_core::entities::CourseWithTeacher;
use scrud_db::live::Live;
use tracing::{debug, warn};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WatchCommands;
use crate::commands::shared::level::level_for_student;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrud watch`.
pub async fn handle(
    action: &WatchCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        WatchCommands::Available { student_id, level } => {
            let level = level_for_student(level.as_deref(), student_id, ctx).await?;
            let live = ctx.service.live_available_courses(student_id, &level);
            stream(live, flags).await
        }
    }
}

/// Print every emission until Ctrl-C or until the producer stops.
async fn stream(mut live: Live<Vec<CourseWithTeacher>>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);
    loop {
        tokio::select! {
            _ = &mut interrupted => {
                debug!("watch interrupted");
                return Ok(());
            }
            snapshot = live.next() => match snapshot {
                Some(Ok(courses)) => output(&courses, flags.format)?,
                Some(Err(error)) => warn!(%error, "live query failed; waiting for the next change"),
                None => return Ok(()),
            },
        }
    }
}
