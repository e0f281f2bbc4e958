use anyhow::bail;
use scrud_config::GradingConfig;
use scrud_core::entities::Enrollment;
use scrud_core::enums::EntityType;
use scrud_core::ids::{PREFIX_COURSE, PREFIX_STUDENT, require_prefix};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{EnrollmentArgs, GradeArgs};
use crate::commands::shared::lookup::found;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrud enroll`.
pub async fn handle_enroll(
    args: &EnrollmentArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    check_ids(&args.student_id, &args.course_id)?;
    let enrollment = ctx.service.enroll(&args.student_id, &args.course_id).await?;
    output(&enrollment, flags.format)
}

/// Handle `scrud unenroll`.
pub async fn handle_unenroll(
    args: &EnrollmentArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    check_ids(&args.student_id, &args.course_id)?;
    found(
        ctx.service.unenroll(&args.student_id, &args.course_id).await,
        EntityType::Enrollment,
        &format!("{}/{}", args.student_id, args.course_id),
    )?;
    output(
        &json!({ "student_id": args.student_id, "course_id": args.course_id, "unenrolled": true }),
        flags.format,
    )
}

/// Handle `scrud grade`.
pub async fn handle_grade(
    args: &GradeArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let enrollment = grade(args, ctx).await?;
    output(&enrollment, flags.format)
}

async fn grade(args: &GradeArgs, ctx: &AppContext) -> anyhow::Result<Enrollment> {
    check_ids(&args.student_id, &args.course_id)?;
    check_scale(&ctx.config.grading, args.score)?;
    found(
        ctx.service
            .update_score(&args.student_id, &args.course_id, args.score)
            .await,
        EntityType::Enrollment,
        &format!("{}/{}", args.student_id, args.course_id),
    )
}

fn check_ids(student_id: &str, course_id: &str) -> anyhow::Result<()> {
    require_prefix(student_id, PREFIX_STUDENT, "student")?;
    require_prefix(course_id, PREFIX_COURSE, "course")?;
    Ok(())
}

fn check_scale(grading: &GradingConfig, score: f32) -> anyhow::Result<()> {
    if !grading.accepts(score) {
        bail!(
            "score {score} is outside the grading scale 0..={}",
            grading.max_score
        );
    }
    Ok(())
}
