use clap::Subcommand;

/// Live views printed on every change.
#[derive(Clone, Debug, Subcommand)]
pub enum WatchCommands {
    /// Courses a student can still enroll in.
    Available {
        student_id: String,
        /// Level code (defaults to the student's level)
        #[arg(long)]
        level: Option<String>,
    },
}
