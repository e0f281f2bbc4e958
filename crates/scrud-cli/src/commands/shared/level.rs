use anyhow::bail;
use scrud_core::enums::EntityType;

use crate::commands::shared::lookup::found;

use crate::context::AppContext;

/// Level for a new student: the explicit flag, else `general.default_level`.
pub fn level_for_new_student(explicit: Option<&str>, ctx: &AppContext) -> anyhow::Result<String> {
    match explicit.or_else(|| ctx.config.general.default_level()) {
        Some(level) if !level.trim().is_empty() => Ok(level.trim().to_string()),
        _ => bail!("no level given: pass --level or set general.default_level"),
    }
}

/// Level for a per-student report: the explicit flag, else the student's own level.
pub async fn level_for_student(
    explicit: Option<&str>,
    student_id: &str,
    ctx: &AppContext,
) -> anyhow::Result<String> {
    if let Some(level) = explicit {
        return Ok(level.to_string());
    }
    let student = found(
        ctx.service.get_student(student_id).await,
        EntityType::Student,
        student_id,
    )?;
    Ok(student.level_code)
}
