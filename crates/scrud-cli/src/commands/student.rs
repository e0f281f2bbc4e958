use scrud_core::entities::Student;
use scrud_core::enums::{EntityType, Gender};
use scrud_db::repos::student::NewStudent;
use scrud_db::updates::student::StudentUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{StudentAddArgs, StudentCommands};
use crate::commands::shared::level::level_for_new_student;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::lookup::found;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrud student`.
pub async fn handle(
    action: &StudentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StudentCommands::Add(args) => {
            let student = add(args, ctx).await?;
            output(&student, flags.format)
        }
        StudentCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let students = ctx.service.list_students(limit).await?;
            output(&students, flags.format)
        }
        StudentCommands::Get { id } => {
            let student = found(ctx.service.get_student(id).await, EntityType::Student, id)?;
            output(&student, flags.format)
        }
        StudentCommands::Update {
            id,
            first_name,
            last_name,
            email,
            date_of_birth,
            gender,
            level,
        } => {
            let mut builder = StudentUpdateBuilder::new();
            if let Some(first_name) = first_name {
                builder = builder.first_name(first_name);
            }
            if let Some(last_name) = last_name {
                builder = builder.last_name(last_name);
            }
            if let Some(email) = email {
                builder = builder.email(email);
            }
            if let Some(date_of_birth) = date_of_birth {
                builder = builder.date_of_birth(*date_of_birth);
            }
            if let Some(gender) = gender {
                builder = builder.gender(parse_enum::<Gender>(gender, "gender")?);
            }
            if let Some(level) = level {
                builder = builder.level_code(level);
            }
            let student = found(
                ctx.service.update_student(id, builder.build()).await,
                EntityType::Student,
                id,
            )?;
            output(&student, flags.format)
        }
        StudentCommands::Delete { id } => {
            found(ctx.service.delete_student(id).await, EntityType::Student, id)?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}

async fn add(args: &StudentAddArgs, ctx: &AppContext) -> anyhow::Result<Student> {
    let new = NewStudent {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        date_of_birth: args.date_of_birth,
        gender: parse_enum(&args.gender, "gender")?,
        level_code: level_for_new_student(args.level.as_deref(), ctx)?,
    };
    Ok(ctx.service.create_student(new).await?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::add;
    use crate::cli::subcommands::StudentAddArgs;
    use crate::context::test_context::in_memory;

    fn args(level: Option<&str>) -> StudentAddArgs {
        StudentAddArgs {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@school.test".into(),
            password: "hunter22".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2004, 12, 9).expect("valid date"),
            gender: "female".into(),
            level: level.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn add_uses_configured_default_level() {
        let mut ctx = in_memory().await;
        ctx.config.general.default_level = "A2".into();
        let student = add(&args(None), &ctx).await.expect("student should be created");
        assert_eq!(student.level_code, "A2");
    }

    #[tokio::test]
    async fn explicit_level_wins() {
        let mut ctx = in_memory().await;
        ctx.config.general.default_level = "A2".into();
        let student = add(&args(Some("B1")), &ctx).await.expect("student should be created");
        assert_eq!(student.level_code, "B1");
    }

    #[tokio::test]
    async fn add_without_any_level_fails() {
        let ctx = in_memory().await;
        let err = add(&args(None), &ctx).await.expect_err("level is required");
        assert!(err.to_string().contains("--level"));
    }

    #[tokio::test]
    async fn invalid_gender_is_rejected_before_the_store() {
        let ctx = in_memory().await;
        let mut bad = args(Some("B1"));
        bad.gender = "unknown".into();
        let err = add(&bad, &ctx).await.expect_err("gender must parse");
        assert!(err.to_string().contains("invalid gender"));
        assert!(ctx.service.list_students(10).await.expect("list").is_empty());
    }
}
