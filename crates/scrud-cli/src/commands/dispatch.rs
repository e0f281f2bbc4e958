use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Student { action } => commands::student::handle(&action, ctx, flags).await,
        Commands::Teacher { action } => commands::teacher::handle(&action, ctx, flags).await,
        Commands::Course { action } => commands::course::handle(&action, ctx, flags).await,
        Commands::Enroll(args) => commands::enrollment::handle_enroll(&args, ctx, flags).await,
        Commands::Unenroll(args) => commands::enrollment::handle_unenroll(&args, ctx, flags).await,
        Commands::Grade(args) => commands::enrollment::handle_grade(&args, ctx, flags).await,
        Commands::Login(args) => commands::login::handle(&args, ctx, flags).await,
        Commands::Levels => commands::levels::handle(ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, ctx, flags).await,
        Commands::Watch { action } => commands::watch::handle(&action, ctx, flags).await,
    }
}
