use clap::Subcommand;

/// Derived, read-only reports.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Level and enrolled averages for a student.
    Grades { student_id: String },
    /// Courses a student can still enroll in.
    Available {
        student_id: String,
        /// Level code (defaults to the student's level)
        #[arg(long)]
        level: Option<String>,
    },
    /// A course's students with their scores.
    Roster { course_id: String },
}
