use scrud_core::enums::EntityType;
use scrud_db::repos::teacher::NewTeacher;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TeacherCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::lookup::found;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrud teacher`.
pub async fn handle(
    action: &TeacherCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TeacherCommands::Add {
            first_name,
            last_name,
            email,
            password,
            gender,
        } => {
            let teacher = ctx
                .service
                .create_teacher(NewTeacher {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    email: email.clone(),
                    password: password.clone(),
                    gender: parse_enum(gender, "gender")?,
                })
                .await?;
            output(&teacher, flags.format)
        }
        TeacherCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let teachers = ctx.service.list_teachers(limit).await?;
            output(&teachers, flags.format)
        }
        TeacherCommands::Get { id } => {
            let teacher = found(ctx.service.get_teacher(id).await, EntityType::Teacher, id)?;
            output(&teacher, flags.format)
        }
        TeacherCommands::Delete { id } => {
            found(ctx.service.delete_teacher(id).await, EntityType::Teacher, id)?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
