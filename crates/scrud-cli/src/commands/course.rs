use scrud_core::enums::EntityType;
use scrud_core::ids::{PREFIX_TEACHER, require_prefix};
use scrud_db::repos::course::NewCourse;
use scrud_db::updates::course::CourseUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CourseCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::lookup::found;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrud course`.
pub async fn handle(
    action: &CourseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CourseCommands::Add {
            name,
            ects,
            level,
            teacher,
            description,
        } => {
            let course = ctx
                .service
                .create_course(NewCourse {
                    name: name.clone(),
                    ects: *ects,
                    level_code: level.clone(),
                    teacher_id: teacher.clone(),
                    description: description.clone(),
                })
                .await?;
            output(&course, flags.format)
        }
        CourseCommands::List {
            level,
            teacher,
            limit,
        } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let mut courses = match (level, teacher) {
                (Some(level), _) => ctx.service.courses_by_level(level).await?,
                (None, Some(teacher)) => ctx.service.courses_by_teacher(teacher).await?,
                (None, None) => ctx.service.list_courses(limit).await?,
            };
            courses.truncate(usize::try_from(limit)?);
            output(&courses, flags.format)
        }
        CourseCommands::Get { id, students } => {
            if *students {
                let course = found(
                    ctx.service.course_with_students(id).await,
                    EntityType::Course,
                    id,
                )?;
                output(&course, flags.format)
            } else {
                let course = found(ctx.service.get_course(id).await, EntityType::Course, id)?;
                output(&course, flags.format)
            }
        }
        CourseCommands::Assign {
            id,
            teacher,
            unassign,
        } => {
            let teacher_id = if *unassign { None } else { teacher.clone() };
            if let Some(teacher_id) = &teacher_id {
                require_prefix(teacher_id, PREFIX_TEACHER, "teacher")?;
            }
            let update = CourseUpdateBuilder::new().teacher_id(teacher_id).build();
            let course = found(
                ctx.service.update_course(id, update).await,
                EntityType::Course,
                id,
            )?;
            output(&course, flags.format)
        }
        CourseCommands::Delete { id } => {
            found(ctx.service.delete_course(id).await, EntityType::Course, id)?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
