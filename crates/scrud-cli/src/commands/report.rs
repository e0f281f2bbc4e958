use scrud_core::enums::EntityType;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::level::level_for_student;
use crate::commands::shared::lookup::found;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrud report`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReportCommands::Grades { student_id } => {
            let report = found(
                ctx.service.grade_report(student_id).await,
                EntityType::Student,
                student_id,
            )?;
            output(&report, flags.format)
        }
        ReportCommands::Available { student_id, level } => {
            let level = level_for_student(level.as_deref(), student_id, ctx).await?;
            let courses = ctx.service.available_courses_for(student_id, &level).await?;
            output(&courses, flags.format)
        }
        ReportCommands::Roster { course_id } => {
            // An unknown course is an error, not an empty roster.
            found(ctx.service.get_course(course_id).await, EntityType::Course, course_id)?;
            let roster = ctx.service.students_with_scores_by_course(course_id).await?;
            output(&roster, flags.format)
        }
    }
}
